use crate::error::ConfigError;

pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
}

impl Config {
    /// Reads the process environment. Call after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = lookup(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        if bot_token.trim().is_empty() {
            return Err(ConfigError::Empty(TOKEN_VAR));
        }
        Ok(Self { bot_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_required() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(TOKEN_VAR)));

        let err = Config::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Empty(TOKEN_VAR)));
    }

    #[test]
    fn token_is_read() {
        let config =
            Config::from_lookup(|key| (key == TOKEN_VAR).then(|| "123:abc".to_string())).unwrap();
        assert_eq!(config.bot_token, "123:abc");
    }
}
