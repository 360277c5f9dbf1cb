//! # Server Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, the shop identity included.
//!
//! | Variable                    | Default                  |
//! |-----------------------------|--------------------------|
//! | `SHELFMARK_PORT`            | `5080`                   |
//! | `SHELFMARK_DATABASE_PATH`   | `./shelfmark.db`         |
//! | `SHELFMARK_CLIENT_BASE_URL` | `http://localhost:5173`  |
//! | `SHELFMARK_SHOP_NAME`       | built-in shop name       |
//! | `SHELFMARK_SHOP_ADDRESS`    | built-in, `\|`-separated |
//! | `SHELFMARK_SHOP_PHONE`      | unset                    |
//! | `SHELFMARK_SHOP_WEBSITE`    | unset                    |
//! | `SHELFMARK_CURRENCY_SYMBOL` | `₹`                      |

use shelfmark_docs::ShopProfile;
use std::env;
use std::path::PathBuf;
use url::Url;

const DEFAULT_PORT: u16 = 5080;
const DEFAULT_DATABASE_PATH: &str = "./shelfmark.db";
const DEFAULT_CLIENT_BASE_URL: &str = "http://localhost:5173";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Where the web client is served; QR codes link to `{base}/p/{code}`
    pub client_base_url: Url,

    /// Printed on invoices and stickers
    pub shop: ShopProfile,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("SHELFMARK_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHELFMARK_PORT".to_string()))?,
            None => DEFAULT_PORT,
        };

        let client_base_url = get("SHELFMARK_CLIENT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_CLIENT_BASE_URL.to_string());
        let client_base_url = Url::parse(&client_base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ConfigError::InvalidValue("SHELFMARK_CLIENT_BASE_URL".to_string()))?;

        let defaults = ShopProfile::default();
        let shop = ShopProfile {
            name: get("SHELFMARK_SHOP_NAME").unwrap_or(defaults.name),
            address_lines: get("SHELFMARK_SHOP_ADDRESS")
                .map(|raw| {
                    raw.split('|')
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.address_lines),
            phone: get("SHELFMARK_SHOP_PHONE"),
            website: get("SHELFMARK_SHOP_WEBSITE"),
            currency_symbol: get("SHELFMARK_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            footer_note: defaults.footer_note,
        };

        Ok(ServerConfig {
            port,
            database_path: get("SHELFMARK_DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
                .into(),
            client_base_url,
            shop,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
