use std::str::FromStr;

use serde::Deserialize;

use crate::ClientError;

const PLATFORM_ENV: &str = "CATALOG_PLATFORM";

/// Network environment the client runs in. An emulator reaches the host
/// machine through a different address than a browser or device does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Emulator,
    #[default]
    Default,
}

impl Platform {
    /// Variable naming the books endpoint for this platform.
    pub fn url_var(self) -> &'static str {
        match self {
            Platform::Emulator => "CATALOG_API_URL_EMULATOR",
            Platform::Default => "CATALOG_API_URL_DEFAULT",
        }
    }

    /// Endpoint captured when the client was built, if any.
    fn build_time_url(self) -> Option<&'static str> {
        match self {
            Platform::Emulator => option_env!("CATALOG_API_URL_EMULATOR"),
            Platform::Default => option_env!("CATALOG_API_URL_DEFAULT"),
        }
    }

    fn fallback_url(self) -> &'static str {
        match self {
            Platform::Emulator => "http://10.0.2.2:3000/books",
            Platform::Default => "http://localhost:3000/books",
        }
    }
}

impl FromStr for Platform {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emulator" => Ok(Platform::Emulator),
            "default" => Ok(Platform::Default),
            other => Err(ClientError::Config(format!(
                "unsupported platform '{other}'; expected emulator/default"
            ))),
        }
    }
}

/// Resolved client configuration. The books endpoint is picked once, here,
/// and handed to the client explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub platform: Platform,
    /// URL of the books collection, e.g. `http://localhost:3000/books`
    pub books_url: String,
}

impl ClientSettings {
    pub fn new(platform: Platform, books_url: impl Into<String>) -> Self {
        Self {
            platform,
            books_url: books_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve settings from `.env` and the process environment.
    pub fn load() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv();

        let platform = match std::env::var(PLATFORM_ENV) {
            Ok(value) => value.parse()?,
            Err(_) => Platform::default(),
        };

        Ok(Self::resolve(platform, |name| std::env::var(name).ok()))
    }

    /// Pick the endpoint for `platform`: runtime variable, then build-time
    /// variable, then the platform's fallback address.
    pub fn resolve(platform: Platform, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let books_url = lookup(platform.url_var())
            .filter(|url| !url.is_empty())
            .or_else(|| platform.build_time_url().map(str::to_string))
            .unwrap_or_else(|| platform.fallback_url().to_string());

        Self::new(platform, books_url)
    }
}
