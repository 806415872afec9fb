use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub id: u64,              // Chain identifier (Ethereum=1, Base=8453)
    pub name: String,         // Human-readable network name
    pub explorer_url: String, // Block explorer base URL for transaction links
}

impl Chain {
    pub fn new(id: u64, name: &str, explorer_url: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            explorer_url: explorer_url.to_string(),
        }
    }

    /// Ethereum mainnet
    pub fn ethereum() -> Self {
        Self::new(1, "Ethereum", "https://etherscan.io")
    }

    /// Base mainnet
    pub fn base() -> Self {
        Self::new(8453, "Base", "https://basescan.org")
    }
}
