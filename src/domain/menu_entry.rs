use validator::ValidateUrl;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPrice(f64);

impl MenuPrice {
    pub fn parse(price: f64) -> Result<MenuPrice, String>{
        if price.is_finite() && price > 0.0 {
            Ok(Self(price))
        } else {
            Err("price must be a positive number".to_string())
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn parse(url: String) -> Result<ImageUrl, String>{
        let url = url.trim().to_string();

        if url.validate_url() {
            Ok(Self(url))
        } else {
            Err(format!("{} is not a valid image url", url))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
