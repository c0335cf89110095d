use anyhow::Context;

use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;

pub fn handle(subject: String, ttl_hours: Option<u64>) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    let secret = config
        .security
        .jwt_secret
        .as_deref()
        .context("SECURITY_JWT_SECRET must be set to sign tokens")?;

    let ttl = ttl_hours.unwrap_or(config.security.jwt_expiry_hours);
    let token = generate_jwt(&Claims::new(subject, ttl), secret.as_bytes())?;
    println!("{}", token);
    Ok(())
}
