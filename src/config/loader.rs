//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/maximus.toml.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::bulkammo::{default_pages, CaliberPage, CommodityPriceConfig, DEFAULT_PRICE_SELECTOR};
use crate::adapters::coingecko::SpotPriceConfig;
use crate::adapters::dexscreener::{TokenScanConfig, DEX_SEARCH_API};
use crate::adapters::forum::{MarketplaceConfig, DEFAULT_PAGE_URL, DEFAULT_SECTION_PREFIX};
use crate::adapters::http::{HttpClientConfig, DEFAULT_USER_AGENT};
use crate::adapters::scrape;
use crate::domain::listing_filter::default_keywords;
use crate::domain::{ListingFilter, PairFilter};

/// Main configuration structure matching config/maximus.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpSection,
    pub alpha: AlphaSection,
    pub ammo: AmmoSection,
    pub gear: GearSection,
    pub spot: SpotSection,
    pub snapshots: SnapshotsSection,
    pub server: ServerSection,
    pub logging: LoggingSection,
}

/// Outbound HTTP section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Browser User-Agent sent with every request
    pub user_agent: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// DEX pair scan ("Alpha Radar") section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlphaSection {
    pub search_url: String,
    pub query: String,
    pub chain_id: String,
    /// Pairs at or below this liquidity are dropped
    pub min_liquidity_usd: f64,
    /// Pairs at or below this 24h volume are dropped
    pub min_volume_24h_usd: f64,
    pub max_results: usize,
}

impl Default for AlphaSection {
    fn default() -> Self {
        let filter = PairFilter::default();
        Self {
            search_url: DEX_SEARCH_API.to_string(),
            query: "solana".to_string(),
            chain_id: filter.chain_id,
            min_liquidity_usd: filter.min_liquidity_usd,
            min_volume_24h_usd: filter.min_volume_24h_usd,
            max_results: filter.max_results,
        }
    }
}

/// Supply price scrape section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmmoSection {
    pub price_selector: String,
    pub pages: Vec<CaliberPage>,
}

impl Default for AmmoSection {
    fn default() -> Self {
        Self {
            price_selector: DEFAULT_PRICE_SELECTOR.to_string(),
            pages: default_pages(),
        }
    }
}

/// Forum classifieds section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GearSection {
    pub page_url: String,
    /// Prepended to relative thread links
    pub origin: String,
    pub row_selector: String,
    pub section_prefix: String,
    pub keywords: Vec<String>,
    pub min_title_len: usize,
    pub max_results: usize,
}

impl Default for GearSection {
    fn default() -> Self {
        let filter = ListingFilter::default();
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            origin: filter.origin,
            row_selector: "tr".to_string(),
            section_prefix: DEFAULT_SECTION_PREFIX.to_string(),
            keywords: default_keywords(),
            min_title_len: filter.min_title_len,
            max_results: filter.max_results,
        }
    }
}

/// Spot price section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpotSection {
    pub api_url: String,
    pub default_asset: String,
}

impl Default for SpotSection {
    fn default() -> Self {
        let spot = SpotPriceConfig::default();
        Self {
            api_url: spot.api_url,
            default_asset: spot.default_asset,
        }
    }
}

/// Snapshot directory section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotsSection {
    /// Directory holding collector output (`~` is expanded)
    pub dir: String,
}

impl Default for SnapshotsSection {
    fn default() -> Self {
        Self {
            dir: "public/data".to_string(),
        }
    }
}

impl SnapshotsSection {
    /// Get snapshot dir with environment variable override
    /// Checks MAXIMUS_SNAPSHOT_DIR env var first, falls back to config value
    pub fn resolved_dir(&self) -> PathBuf {
        let dir = std::env::var("MAXIMUS_SNAPSHOT_DIR").unwrap_or_else(|_| self.dir.clone());
        PathBuf::from(shellexpand::tilde(&dir).into_owned())
    }
}

/// HTTP boundary section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind_addr: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
        }
    }
}

impl ServerSection {
    /// Get bind address with environment variable override
    /// Checks MAXIMUS_BIND_ADDR env var first, falls back to config value
    pub fn get_bind_addr(&self) -> String {
        std::env::var("MAXIMUS_BIND_ADDR").unwrap_or_else(|_| self.bind_addr.clone())
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<scrape::InvalidSelector> for ConfigError {
    fn from(err: scrape::InvalidSelector) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!("{} cannot be empty", field)));
    }
    Ok(())
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // HTTP
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "http.timeout_secs must be > 0".to_string(),
            ));
        }
        require_non_empty("http.user_agent", &self.http.user_agent)?;

        // Alpha
        require_non_empty("alpha.search_url", &self.alpha.search_url)?;
        require_non_empty("alpha.query", &self.alpha.query)?;
        require_non_empty("alpha.chain_id", &self.alpha.chain_id)?;
        if self.alpha.min_liquidity_usd < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "alpha.min_liquidity_usd must be >= 0, got {}",
                self.alpha.min_liquidity_usd
            )));
        }
        if self.alpha.min_volume_24h_usd < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "alpha.min_volume_24h_usd must be >= 0, got {}",
                self.alpha.min_volume_24h_usd
            )));
        }
        if self.alpha.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "alpha.max_results must be > 0".to_string(),
            ));
        }

        // Ammo
        scrape::compile(&self.ammo.price_selector)?;
        if self.ammo.pages.is_empty() {
            return Err(ConfigError::ValidationError(
                "ammo.pages cannot be empty".to_string(),
            ));
        }
        for (i, page) in self.ammo.pages.iter().enumerate() {
            require_non_empty("ammo.pages.url", &page.url)?;
            if self.ammo.pages[..i].iter().any(|p| p.caliber == page.caliber) {
                return Err(ConfigError::ValidationError(format!(
                    "ammo.pages lists caliber {} more than once",
                    page.caliber
                )));
            }
        }

        // Gear
        require_non_empty("gear.page_url", &self.gear.page_url)?;
        require_non_empty("gear.origin", &self.gear.origin)?;
        reqwest::Url::parse(&self.gear.origin).map_err(|e| {
            ConfigError::ValidationError(format!("gear.origin is not a URL: {}", e))
        })?;
        require_non_empty("gear.section_prefix", &self.gear.section_prefix)?;
        scrape::compile(&self.gear.row_selector)?;
        scrape::compile(&MarketplaceConfig::from(self).link_selector())?;
        if self.gear.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "gear.keywords must contain at least one keyword".to_string(),
            ));
        }
        if self.gear.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "gear.max_results must be > 0".to_string(),
            ));
        }

        // Spot
        require_non_empty("spot.api_url", &self.spot.api_url)?;
        reqwest::Url::parse(&self.spot.api_url).map_err(|e| {
            ConfigError::ValidationError(format!("spot.api_url is not a URL: {}", e))
        })?;
        require_non_empty("spot.default_asset", &self.spot.default_asset)?;

        // Snapshots / server
        require_non_empty("snapshots.dir", &self.snapshots.dir)?;
        require_non_empty("server.bind_addr", &self.server.bind_addr)?;

        Ok(())
    }
}

// Conversions from Config sections to adapter configs

impl From<&Config> for HttpClientConfig {
    fn from(config: &Config) -> Self {
        HttpClientConfig {
            timeout: Duration::from_secs(config.http.timeout_secs),
            user_agent: config.http.user_agent.clone(),
        }
    }
}

impl From<&Config> for TokenScanConfig {
    fn from(config: &Config) -> Self {
        TokenScanConfig {
            search_url: config.alpha.search_url.clone(),
            query: config.alpha.query.clone(),
            filter: PairFilter {
                chain_id: config.alpha.chain_id.clone(),
                min_liquidity_usd: config.alpha.min_liquidity_usd,
                min_volume_24h_usd: config.alpha.min_volume_24h_usd,
                max_results: config.alpha.max_results,
            },
        }
    }
}

impl From<&Config> for CommodityPriceConfig {
    fn from(config: &Config) -> Self {
        CommodityPriceConfig {
            price_selector: config.ammo.price_selector.clone(),
            pages: config.ammo.pages.clone(),
        }
    }
}

impl From<&Config> for MarketplaceConfig {
    fn from(config: &Config) -> Self {
        MarketplaceConfig {
            page_url: config.gear.page_url.clone(),
            row_selector: config.gear.row_selector.clone(),
            section_prefix: config.gear.section_prefix.clone(),
            filter: ListingFilter {
                origin: config.gear.origin.clone(),
                keywords: config
                    .gear
                    .keywords
                    .iter()
                    .filter(|k| !k.trim().is_empty())
                    .cloned()
                    .collect(),
                min_title_len: config.gear.min_title_len,
                max_results: config.gear.max_results,
            },
        }
    }
}

impl From<&Config> for SpotPriceConfig {
    fn from(config: &Config) -> Self {
        SpotPriceConfig {
            api_url: config.spot.api_url.clone(),
            default_asset: config.spot.default_asset.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Caliber;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[http]
timeout_secs = 8
user_agent = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0"

[alpha]
query = "solana"
chain_id = "solana"
min_liquidity_usd = 7500.0
min_volume_24h_usd = 20000.0
max_results = 5

[ammo]
price_selector = ".price-box .price"

[[ammo.pages]]
caliber = "9mm"
url = "https://www.bulkammo.com/handgun/bulk-9mm-ammo?dir=asc&order=cost_per_round"

[[ammo.pages]]
caliber = ".223"
url = "https://www.bulkammo.com/rifle/bulk-.223-ammo?dir=asc&order=cost_per_round"

[gear]
keywords = ["Aimpoint", "EOTech"]
max_results = 3

[spot]
default_asset = "bitcoin"

[snapshots]
dir = "/var/lib/maximus/data"

[server]
bind_addr = "0.0.0.0:9000"

[logging]
level = "info"
json = true
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.http.timeout_secs, 8);
        assert_eq!(config.alpha.min_liquidity_usd, 7500.0);
        assert_eq!(config.ammo.pages.len(), 2);
        assert_eq!(config.ammo.pages[1].caliber, Caliber::TwoTwentyThree);
        assert_eq!(config.gear.keywords, vec!["Aimpoint", "EOTech"]);
        assert_eq!(config.gear.min_title_len, 6);
        assert_eq!(config.spot.default_asset, "bitcoin");
        assert!(config.logging.json);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.alpha.max_results, 5);
        assert_eq!(config.ammo.pages.len(), 3);
        assert_eq!(config.gear.keywords.len(), 7);
        assert_eq!(config.server.bind_addr, "127.0.0.1:8787");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_shipped_config_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/maximus.toml");
        let config = load_config(&path).unwrap();

        assert_eq!(config.ammo.pages, default_pages());
        assert_eq!(config.gear.keywords, default_keywords());
        assert_eq!(config.alpha.search_url, DEX_SEARCH_API);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/maximus.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_unknown_caliber_is_parse_error() {
        let file = write_config(
            r#"
[[ammo.pages]]
caliber = "7.62"
url = "https://example.com"
"#,
        );
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "[http]\ntimeout_secs = 0\n",
            "[alpha]\nmax_results = 0\n",
            "[alpha]\nmin_volume_24h_usd = -1.0\n",
            "[ammo]\nprice_selector = \"..price\"\n",
            "[ammo]\npages = []\n",
            "[gear]\nkeywords = []\n",
            "[gear]\nrow_selector = \"\"\n",
            "[gear]\norigin = \"www.ar15.com\"\n",
            "[spot]\napi_url = \"\"\n",
            "[spot]\napi_url = \"api.coingecko.com/simple/price\"\n",
            r#"
[[ammo.pages]]
caliber = "9mm"
url = "https://a.example"

[[ammo.pages]]
caliber = "9mm"
url = "https://b.example"
"#,
        ];

        for case in cases {
            let file = write_config(case);
            let result = load_config(file.path());
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "expected validation error for:\n{}",
                case
            );
        }
    }

    #[test]
    fn test_config_to_adapter_configs() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        let http = HttpClientConfig::from(&config);
        assert_eq!(http.timeout, Duration::from_secs(8));

        let alpha = TokenScanConfig::from(&config);
        assert_eq!(alpha.filter.min_volume_24h_usd, 20_000.0);
        assert_eq!(alpha.request_url(), format!("{}?q=solana", DEX_SEARCH_API));

        let gear = MarketplaceConfig::from(&config);
        assert_eq!(gear.filter.max_results, 3);
        assert_eq!(gear.filter.origin, "https://www.ar15.com");

        let ammo = CommodityPriceConfig::from(&config);
        assert_eq!(ammo.pages[0].caliber, Caliber::NineMm);

        let spot = SpotPriceConfig::from(&config);
        assert_eq!(spot.default_asset, "bitcoin");
    }
}
