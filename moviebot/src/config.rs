use std::{env, fmt, str::FromStr, time::Duration};

use tracing::{debug, warn};

use crate::error::ConfigError;

/// Default base URL for the TMDB v3 API
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Default base URL for the YouTube Data v3 API
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
/// Default timeout applied to every outbound request
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Credentials and endpoints for the metadata and video services
#[derive(Clone)]
pub struct ServiceConfig {
    /// TMDB API key (`TMDB_API_KEY`)
    pub tmdb_api_key: String,
    /// YouTube Data API key (`YOUTUBE_API_KEY`)
    pub youtube_api_key: String,
    /// TMDB base URL (`TMDB_BASE_URL`)
    pub tmdb_base_url: String,
    /// YouTube base URL (`YOUTUBE_BASE_URL`)
    pub youtube_base_url: String,
    /// Per-request timeout (`HTTP_TIMEOUT_SECS`)
    pub http_timeout: Duration,
}

impl ServiceConfig {
    /// Read the service configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read the service configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            tmdb_api_key: required_var(&lookup, "TMDB_API_KEY")?,
            youtube_api_key: required_var(&lookup, "YOUTUBE_API_KEY")?,
            tmdb_base_url: optional_var(&lookup, "TMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_owned()),
            youtube_base_url: optional_var(&lookup, "YOUTUBE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_BASE_URL.to_owned()),
            http_timeout: parsed_var::<u64, _>(&lookup, "HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_HTTP_TIMEOUT),
        })
    }
}

// Keys stay out of logs.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("tmdb_api_key", &"<redacted>")
            .field("youtube_api_key", &"<redacted>")
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

/// Load a `.env` file from the working directory (or a parent) if there is one.
///
/// Variables already present in the environment win over the file.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
    }
}

/// Fetch a variable that must be present and non-empty
pub fn required_var<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional_var(lookup, var).ok_or(ConfigError::Missing(var))
}

/// Fetch a variable, treating an empty value as unset
pub fn optional_var<F>(lookup: &F, var: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Fetch and parse an optional variable
pub fn parsed_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    optional_var(lookup, var)
        .map(|value| {
            value.parse::<T>().map_err(|err| ConfigError::Invalid {
                var,
                reason: err.to_string(),
            })
        })
        .transpose()
}
