use anyhow::Context;
use argon2::{password_hash::{rand_core::OsRng, SaltString}, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};

use crate::telemetry::spawn_blocking_with_tracing;

fn compute_password_hash(password: &SecretString) -> Result<String, anyhow::Error>{
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| anyhow::anyhow!("Failed to compute password hash"))
}

// Hashing is CPU bound, keep it off the actix workers
#[tracing::instrument(
    "Hashing password",
    skip_all
)]
pub async fn hash_password(password: SecretString) -> Result<String, anyhow::Error>{
    spawn_blocking_with_tracing(move || compute_password_hash(&password))
        .await
        .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Verifying password",
    skip_all
)]
pub async fn verify_password(candidate: SecretString, stored_hash: String) -> Result<bool, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let stored_hash = PasswordHash::new(&stored_hash)
            .map_err(|_| anyhow::anyhow!("Failed to parse PasswordHash from stored hash"))?;

        Ok(Argon2::default()
            .verify_password(candidate.expose_secret().as_bytes(), &stored_hash)
            .is_ok())
    })
    .await
    .context("Failed due to threadpool error")?
}
