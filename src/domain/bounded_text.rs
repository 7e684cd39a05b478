// Required free text with an upper bound on its length (in characters)
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedText(String);

impl BoundedText {
    pub fn parse(value: String, field: &str, max_chars: usize) -> Result<BoundedText, String>{
        let value = value.trim().to_string();

        if value.is_empty() {
            return Err(format!("{} is required", field))
        }

        if value.chars().count() > max_chars {
            return Err(format!("{} cannot be longer than {} characters", field, max_chars))
        }

        Ok(Self(value))
    }

    // Same bound for optional fields; blank input counts as absent
    pub fn parse_optional(value: Option<String>, field: &str, max_chars: usize) -> Result<Option<BoundedText>, String>{
        match value {
            Some(v) if !v.trim().is_empty() => Self::parse(v, field, max_chars).map(Some),
            _ => Ok(None)
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for BoundedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
