use serde::Deserialize;

/// Environment variable read by [`Config::from_env`] for the API key.
pub const KEY_ENV: &str = "NEXMO_KEY";
/// Environment variable read by [`Config::from_env`] for the API secret.
pub const SECRET_ENV: &str = "NEXMO_SECRET";

#[derive(Debug, Clone, Default, Deserialize)]
/// Raw client configuration, e.g. loaded from a config file or the environment.
///
/// Both fields are optional here so that a missing value surfaces as
/// [`NexmoError::InvalidConfig`](super::NexmoError::InvalidConfig) when the client is built.
pub struct Config {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl Config {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            secret: Some(secret.into()),
        }
    }

    /// Read `NEXMO_KEY` and `NEXMO_SECRET`; unset variables stay `None`.
    pub fn from_env() -> Self {
        Self {
            key: std::env::var(KEY_ENV).ok(),
            secret: std::env::var(SECRET_ENV).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"key": "abc"}"#).unwrap();
        assert_eq!(config.key.as_deref(), Some("abc"));
        assert_eq!(config.secret, None);
    }
}
