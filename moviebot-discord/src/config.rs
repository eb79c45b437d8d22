use std::fmt;

use moviebot::{
    config::{parsed_var, required_var},
    ConfigError, ServiceConfig,
};
use serenity::model::id::GuildId;

/// Everything the Discord bot needs to start
#[derive(Clone)]
pub struct BotConfig {
    /// The bot token (`DISCORD_TOKEN`)
    pub token: String,
    /// The application id (`DISCORD_USER_ID`)
    pub application_id: u64,
    /// Register commands for this guild only (`TEST_GUILD_ID`), otherwise globally
    pub guild_id: Option<GuildId>,
    /// Keys and endpoints for the movie services
    pub services: ServiceConfig,
}

impl BotConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            token: required_var(&lookup, "DISCORD_TOKEN")?,
            application_id: parsed_var::<u64, _>(&lookup, "DISCORD_USER_ID")?
                .ok_or(ConfigError::Missing("DISCORD_USER_ID"))?,
            guild_id: parsed_var::<u64, _>(&lookup, "TEST_GUILD_ID")?.map(GuildId),
            services: ServiceConfig::from_lookup(&lookup)?,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .field("services", &self.services)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DISCORD_TOKEN", "secret-token"),
        ("DISCORD_USER_ID", "123456789"),
        ("TMDB_API_KEY", "tmdb"),
        ("YOUTUBE_API_KEY", "youtube"),
    ];

    #[test]
    fn reads_discord_settings() {
        let config = BotConfig::from_lookup(lookup(BASE)).unwrap();
        assert_eq!(config.token, "secret-token");
        assert_eq!(config.application_id, 123456789);
        assert_eq!(config.guild_id, None);
        assert_eq!(config.services.tmdb_api_key, "tmdb");

        let mut vars = BASE.to_vec();
        vars.push(("TEST_GUILD_ID", "42"));
        let config = BotConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.guild_id, Some(GuildId(42)));
    }

    #[test]
    fn reports_the_offending_variable() {
        let without_token: Vec<_> = BASE[1..].to_vec();
        assert_eq!(
            BotConfig::from_lookup(lookup(&without_token)).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );

        let mut vars = BASE.to_vec();
        vars[1] = ("DISCORD_USER_ID", "not-a-number");
        assert!(matches!(
            BotConfig::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Invalid { var: "DISCORD_USER_ID", .. }
        ));
    }

    #[test]
    fn debug_output_hides_the_token() {
        let config = BotConfig::from_lookup(lookup(BASE)).unwrap();
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
