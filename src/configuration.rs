use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JWTSettings,
    pub booking: BookingSettings,
    pub seed: SeedSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    pub seed_demo_data: bool
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub max_connections: u32
}

impl DatabaseSettings {
    // Url of the server itself, used to create databases
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JWTSettings{
    pub secret: String,
    pub expiry_hours: u64
}

// Front-door policy applied before a request reaches the resolver
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct BookingSettings{
    pub max_party_size: i32
}

#[derive(Deserialize, Debug)]
pub struct SeedSettings{
    pub admin_email: String,
    pub admin_password: SecretString
}

impl Settings{
    /// Reads `configuration/base.yaml`, then lets `APP__<SECTION>__<KEY>`
    /// environment variables override individual values.
    pub fn get() -> Result<Self, config::ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
