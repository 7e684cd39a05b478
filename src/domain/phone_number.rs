use std::fmt::Debug;

use phonenumber::country;

// Numbers without an international prefix are read in the French numbering plan
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumberDomain(String);

impl PhoneNumberDomain{
    pub fn parse(number: String) -> Result<PhoneNumberDomain, String>{
        let number = number.trim().to_string();

        if number.is_empty() {
            return Err("phone number is required".to_string())
        }

        if phonenumber::parse(Some(country::FR), &number).is_ok(){
            Ok(Self(number))
        } else {
            Err(format!("{} is not a valid phone number", number))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for PhoneNumberDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumberDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
