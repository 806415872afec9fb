#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Chain {id} ({name}) is not supported. Only Ethereum (1) and Base (8453) are supported.")]
    UnsupportedChain { id: u64, name: String },

    #[error("ETHERSCAN_API_KEY is required for token discovery")]
    MissingApiKey,

    #[error("Etherscan v1 API error: {0}")]
    UpstreamStatus(u16),

    #[error("Etherscan API error: {0}")]
    Upstream(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
