// src/explorer/models.rs
use serde::{Deserialize, Serialize};

/// The only token standard accepted downstream.
pub const ERC20: &str = "ERC-20";

// Module for deserializing values that upstream APIs return either as
// JSON numbers or as strings
pub mod string_or_number {
    use serde::{self, Deserializer};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumber;

        impl<'de> serde::de::Visitor<'de> for StringOrNumber {
            type Value = Option<String>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, a string, or null")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Some(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Some(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Some(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Some(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Some(value.to_string()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(StringOrNumber)
            }
        }

        deserializer.deserialize_option(StringOrNumber)
    }
}

/// Token metadata as reported by the aggregated endpoint (Blockscout shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub decimals: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub exchange_rate: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub token_type: String,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub holders: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub total_supply: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub circulating_market_cap: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub volume_24h: Option<String>,
}

/// One token holding in canonical shape. Both discovery strategies
/// normalize into this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenItem {
    pub token: TokenInfo,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub token_instance: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub value: Option<String>,
}

/// The aggregated endpoint answers in one of two known shapes; anything
/// else is a parse failure and triggers the v1 fallback.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AggregatedResponse {
    Canonical(CanonicalResponse),
    Alternate(AlternateResponse),
}

/// Blockscout-style `{items: [...]}` body, already canonical
#[derive(Debug, Deserialize)]
pub struct CanonicalResponse {
    pub items: Vec<TokenItem>,
}

/// Alternate `{data: [...]}` body that needs field mapping
#[derive(Debug, Deserialize)]
pub struct AlternateResponse {
    pub data: Vec<AlternateEntry>,
}

/// One element of the alternate `data` array. Numeric fields arrive as
/// either numbers or strings depending on the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternateEntry {
    #[serde(default, rename = "contractAddress")]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub decimals: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub price: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub holders: Option<String>,
    #[serde(default, rename = "totalSupply", deserialize_with = "string_or_number::deserialize")]
    pub total_supply: Option<String>,
    #[serde(default, rename = "marketCap", deserialize_with = "string_or_number::deserialize")]
    pub market_cap: Option<String>,
    #[serde(default, deserialize_with = "string_or_number::deserialize")]
    pub balance: Option<String>,
    #[serde(default, rename = "tokenBalance", deserialize_with = "string_or_number::deserialize")]
    pub token_balance: Option<String>,
}

impl From<AlternateEntry> for TokenItem {
    fn from(entry: AlternateEntry) -> Self {
        TokenItem {
            token: TokenInfo {
                address: entry
                    .contract_address
                    .or(entry.address)
                    .unwrap_or_default(),
                decimals: Some(entry.decimals.unwrap_or_else(|| "18".to_string())),
                exchange_rate: entry.price,
                icon_url: entry.logo,
                name: entry.name.unwrap_or_default(),
                symbol: entry.symbol.unwrap_or_default(),
                token_type: ERC20.to_string(),
                holders: Some(entry.holders.unwrap_or_else(|| "0".to_string())),
                total_supply: Some(entry.total_supply.unwrap_or_else(|| "0".to_string())),
                circulating_market_cap: entry.market_cap,
                volume_24h: None,
            },
            token_id: None,
            token_instance: None,
            value: Some(
                entry
                    .balance
                    .or(entry.token_balance)
                    .unwrap_or_else(|| "0".to_string()),
            ),
        }
    }
}

/// v1 `tokentx` response body. `result` stays untyped until the status
/// check because failed calls return a string in its place.
#[derive(Debug, Deserialize)]
pub struct TransferListResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// One ERC-20 transfer from the v1 `tokentx` history
#[derive(Debug, Clone, Deserialize)]
pub struct TokenTransfer {
    #[serde(default, rename = "contractAddress")]
    pub contract_address: Option<String>,
    #[serde(default, rename = "tokenDecimal")]
    pub token_decimal: Option<String>,
    #[serde(default, rename = "tokenSymbol")]
    pub token_symbol: Option<String>,
    #[serde(default, rename = "tokenName")]
    pub token_name: Option<String>,
}

/// v1 `tokenbalancemulti` response body
#[derive(Debug, Deserialize)]
pub struct BalanceMultiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl BalanceMultiResponse {
    /// Balance strings positionally matching the requested contract
    /// addresses, or None when the call did not succeed.
    pub fn balances(self) -> Option<Vec<String>> {
        if self.status != "1" {
            return None;
        }
        serde_json::from_value(self.result).ok()
    }
}
