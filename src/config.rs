use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Timeout for HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Courtesy delay between successive domain attempts in milliseconds
    #[serde(default = "default_rate_limit")]
    pub rate_limit_delay_ms: u64,

    /// Default number of listing results when the caller does not say
    #[serde(default = "default_list_size")]
    pub default_list_size: usize,

    /// Hard cap on listing results per call
    #[serde(default = "default_max_list_size")]
    pub max_list_size: usize,

    /// Extra blacklisted slugs on top of the built-in set
    #[serde(default)]
    pub blacklist: Vec<String>,
}

fn default_timeout() -> u64 { 10 }
fn default_rate_limit() -> u64 { 1000 }
fn default_list_size() -> usize { 30 }
fn default_max_list_size() -> usize { 50 }

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            rate_limit_delay_ms: 1000,
            default_list_size: 30,
            max_list_size: 50,
            blacklist: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }
}

impl ScraperConfig {
    /// Clamp a requested listing size into the valid range.
    ///
    /// Zero or negative requests clamp up to 1, oversized requests clamp
    /// down to `max_list_size`.
    pub fn clamp_limit(&self, requested: Option<i64>) -> usize {
        let n = requested.unwrap_or(self.default_list_size as i64);
        n.clamp(1, self.max_list_size as i64) as usize
    }
}
