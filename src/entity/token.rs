use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A normalized ERC-20 holding produced by token discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub address: String,          // Contract address, original casing preserved
    pub symbol: String,           // Token symbol (e.g. "USDC", "DAI")
    pub name: String,             // Full token name
    pub decimals: u32,            // Declared decimal precision
    pub balance: String,          // Human-readable balance, 4 fractional digits
    pub raw_balance: BigUint,     // Exact on-chain balance, never lossy
    pub logo_uri: Option<String>, // Token logo URL, when the source provides one
    pub price: f64,               // Unit price in USD, 0.0 when unavailable
}
