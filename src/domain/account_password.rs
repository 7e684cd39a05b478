use secrecy::{ExposeSecret, SecretString};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug)]
pub struct AccountPassword(SecretString);

impl AccountPassword {
    pub fn parse(password: SecretString) -> Result<AccountPassword, String>{
        if password.expose_secret().chars().count() < MIN_PASSWORD_CHARS {
            return Err(format!("password must contain at least {} characters", MIN_PASSWORD_CHARS))
        }

        Ok(Self(password))
    }

    pub fn into_secret(self) -> SecretString {
        self.0
    }
}
