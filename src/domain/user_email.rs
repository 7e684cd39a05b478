use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq)]
pub struct UserEmail(pub String);

impl UserEmail {
    // Emails are stored lowercased so lookups are case-insensitive
    pub fn parse(email: String) -> Result<UserEmail, String>{
        let email = email.trim().to_lowercase();

        if email.validate_email() {
            Ok(Self(email))
        } else {
            Err(format!("{} is not a valid email", email))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
