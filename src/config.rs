use std::collections::HashMap;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Etherscan API credential, shared by the v2 and v1 endpoints
    pub etherscan_api_key: String,

    /// Serve the static mock dataset instead of calling upstream APIs
    pub use_mocks: bool,

    /// Base URL for the aggregated v2 "tokens by address" endpoint
    pub v2_api_url: String,

    /// Per-chain base URLs for the v1 endpoints
    pub v1_api_urls: HashMap<u64, String>,

    /// v1 base URL used when a chain has no explicit mapping
    pub default_v1_api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut v1_api_urls = HashMap::new();
        v1_api_urls.insert(1, "https://api.etherscan.io".to_string());
        v1_api_urls.insert(8453, "https://api.basescan.org".to_string());

        Self {
            etherscan_api_key: String::new(),
            use_mocks: false,
            v2_api_url: "https://api.etherscan.io/api/v2".to_string(),
            v1_api_urls,
            default_v1_api_url: "https://api.etherscan.io".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a new configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            etherscan_api_key: env::var("ETHERSCAN_API_KEY").unwrap_or_default(),
            use_mocks: env::var("USE_MOCKS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            v2_api_url: env::var("ETHERSCAN_V2_API_URL").unwrap_or(defaults.v2_api_url),
            v1_api_urls: defaults.v1_api_urls,
            default_v1_api_url: defaults.default_v1_api_url,
        }
    }

    /// Resolves the v1 API base URL for a chain, falling back to the default host
    pub fn v1_api_url(&self, chain_id: u64) -> &str {
        self.v1_api_urls
            .get(&chain_id)
            .map(String::as_str)
            .unwrap_or(&self.default_v1_api_url)
    }
}
