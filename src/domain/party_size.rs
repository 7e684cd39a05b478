#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartySize(i32);

impl PartySize {
    // The upper bound is booking policy from configuration, the resolver itself has none
    pub fn parse(value: i32, max_party_size: i32) -> Result<PartySize, String>{
        if value < 1 {
            return Err("number_of_people must be a positive integer".to_string())
        }

        if value > max_party_size {
            return Err(format!(
                "number_of_people cannot exceed {} for an online reservation",
                max_party_size
            ))
        }

        Ok(Self(value))
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}
