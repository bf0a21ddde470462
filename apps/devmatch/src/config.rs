//! Runtime configuration.
//!
//! Flags win, then the environment (read by clap through `env = ...`), then
//! the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use devmatch_sdk::{CachedSession, DEFAULT_TIMEOUT, DevMatchClient, IdentityCache};
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Identity cache location relative to the home directory.
const IDENTITY_DIR: &str = ".devmatch";
const IDENTITY_FILE: &str = "identity.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub identity_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Fill anything the command line left unset.
    pub fn resolve(
        api_url: Option<String>,
        identity_file: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Self {
        Self::resolve_with_home(
            api_url,
            identity_file,
            timeout_secs,
            std::env::var_os("HOME").map(PathBuf::from),
        )
    }

    fn resolve_with_home(
        api_url: Option<String>,
        identity_file: Option<PathBuf>,
        timeout_secs: Option<u64>,
        home: Option<PathBuf>,
    ) -> Self {
        let api_url = match api_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => {
                debug!(api_url = %url, "API URL from flag or DEVMATCH_API_URL");
                url
            }
            None => {
                info!("DEVMATCH_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };

        let identity_file = identity_file.unwrap_or_else(|| {
            let base = home.unwrap_or_else(|| {
                warn!("HOME not set, keeping identity in the working directory");
                PathBuf::new()
            });
            base.join(IDENTITY_DIR).join(IDENTITY_FILE)
        });

        let timeout = match timeout_secs {
            Some(0) => {
                warn!("Invalid DEVMATCH_TIMEOUT_SECS value: 0, using default");
                DEFAULT_TIMEOUT
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Self {
            api_url,
            identity_file,
            timeout,
        }
    }

    pub fn client(&self) -> DevMatchClient {
        DevMatchClient::with_timeout(self.api_url.clone(), self.timeout)
    }

    pub fn session(&self) -> CachedSession {
        CachedSession::new(self.client(), IdentityCache::new(self.identity_file.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::resolve_with_home(None, None, None, Some(PathBuf::from("/home/ada")));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(
            config.identity_file,
            PathBuf::from("/home/ada/.devmatch/identity.json")
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn no_home_uses_working_directory() {
        let config = Config::resolve_with_home(None, None, None, None);
        assert_eq!(config.identity_file, PathBuf::from(".devmatch/identity.json"));
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::resolve_with_home(
            Some("https://api.devmatch.dev".into()),
            Some(PathBuf::from("/tmp/me.json")),
            Some(5),
            Some(PathBuf::from("/home/ada")),
        );
        assert_eq!(config.api_url, "https://api.devmatch.dev");
        assert_eq!(config.identity_file, PathBuf::from("/tmp/me.json"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_url_and_zero_timeout_fall_back() {
        let config = Config::resolve_with_home(Some("  ".into()), None, Some(0), None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
