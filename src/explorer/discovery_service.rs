use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use num_traits::Zero;
use reqwest::Client;

use crate::config::AppConfig;
use crate::entity::{Chain, SweepError, Token};
use crate::explorer::balance::{format_balance, parse_decimals, parse_raw_balance};
use crate::explorer::batch::PacedBatches;
use crate::explorer::mocks::TOKENS_MOCK;
use crate::explorer::models::{
    AggregatedResponse, BalanceMultiResponse, TokenInfo, TokenItem, TokenTransfer,
    TransferListResponse, ERC20,
};
use crate::utils::shorten_address;

/// Chains the aggregated v2 endpoint is queried for.
pub const SUPPORTED_CHAINS: [u64; 2] = [1, 8453];

/// Etherscan allows up to 20 contract addresses per tokenbalancemulti call.
const BALANCE_BATCH_SIZE: usize = 20;

/// Pause between consecutive balance batches.
const BALANCE_BATCH_DELAY: Duration = Duration::from_millis(200);

/// Discovers a wallet's ERC-20 holdings on a chain.
#[async_trait]
pub trait TokenDiscovery: Send + Sync {
    /// Returns the wallet's positive-balance ERC-20 tokens in discovery
    /// order. Fails only on configuration errors and on v1 history-fetch
    /// transport errors; everything else degrades to fallback or empty.
    async fn discover_tokens(&self, address: &str, chain: &Chain)
        -> Result<Vec<Token>, SweepError>;
}

/// Token metadata captured at first sighting in the transfer history.
/// The address keeps its original casing for downstream contract calls;
/// deduplication happens on the lowercased form.
#[derive(Debug, Clone)]
struct KnownToken {
    address: String,
    decimals: String,
    symbol: String,
    name: String,
}

/// Token discovery backed by the Etherscan v2 aggregated endpoint with a
/// v1 history-plus-balances fallback.
pub struct EtherscanTokenDiscovery {
    http_client: Client,
    config: AppConfig,
}

impl EtherscanTokenDiscovery {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    /// Strategy A: one call to the aggregated v2 endpoint. Returns None
    /// when the response is unusable, which hands control to strategy B.
    async fn fetch_aggregated(&self, address: &str, chain_id: u64) -> Option<Vec<TokenItem>> {
        let url = format!(
            "{}/accounts/{}/tokens?chainid={}&apikey={}",
            self.config.v2_api_url, address, chain_id, self.config.etherscan_api_key
        );
        debug!("Trying aggregated v2 endpoint for chain {}", chain_id);

        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("v2 request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("v2 endpoint answered {}", response.status());
            return None;
        }

        match response.json::<AggregatedResponse>().await {
            Ok(AggregatedResponse::Canonical(canonical)) => Some(canonical.items),
            Ok(AggregatedResponse::Alternate(alternate)) => Some(
                alternate
                    .data
                    .into_iter()
                    .map(TokenItem::from)
                    .collect(),
            ),
            Err(e) => {
                warn!("v2 payload matched no known shape: {}", e);
                None
            }
        }
    }

    /// Strategy B phase 1: full token transfer history from the v1
    /// endpoint. Failures here abort the whole discovery call.
    async fn fetch_transfer_history(
        &self,
        address: &str,
        chain_id: u64,
    ) -> Result<Vec<TokenTransfer>, SweepError> {
        let base_url = self.config.v1_api_url(chain_id);
        let url = format!(
            "{}/api?module=account&action=tokentx&address={}\
             &startblock=0&endblock=99999999&sort=desc&page=1&offset=10000&apikey={}",
            base_url, address, self.config.etherscan_api_key
        );
        debug!("Fetching v1 transfer history from {}", base_url);

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SweepError::UpstreamStatus(response.status().as_u16()));
        }

        let body: TransferListResponse = response.json().await?;
        if body.status != "1" || !body.result.is_array() {
            return Err(SweepError::Upstream(
                body.message.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        Ok(serde_json::from_value(body.result).unwrap_or_default())
    }

    /// Strategy B phase 2: current balances for the deduplicated token
    /// set, 20 addresses per call, 200ms between calls. A failed batch
    /// contributes nothing; discovery carries on.
    async fn fetch_balances(
        &self,
        address: &str,
        chain_id: u64,
        tokens: &[KnownToken],
    ) -> Vec<TokenItem> {
        let pacer = PacedBatches::new(BALANCE_BATCH_SIZE, BALANCE_BATCH_DELAY);
        pacer
            .run(tokens, |batch| {
                self.fetch_balance_batch(address, chain_id, batch)
            })
            .await
    }

    async fn fetch_balance_batch(
        &self,
        address: &str,
        chain_id: u64,
        batch: Vec<KnownToken>,
    ) -> Vec<TokenItem> {
        let contract_addresses = batch
            .iter()
            .map(|token| token.address.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/api?module=account&action=tokenbalancemulti&address={}\
             &contractaddresses={}&tag=latest&apikey={}",
            self.config.v1_api_url(chain_id),
            address,
            contract_addresses,
            self.config.etherscan_api_key
        );

        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Balance batch request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("Balance batch answered {}", response.status());
            return Vec::new();
        }

        let balances = match response.json::<BalanceMultiResponse>().await {
            Ok(body) => body.balances().unwrap_or_default(),
            Err(e) => {
                warn!("Balance batch payload unreadable: {}", e);
                return Vec::new();
            }
        };

        let mut items = Vec::new();
        for (token, balance) in batch.iter().zip(balances.iter()) {
            let raw = parse_raw_balance(balance);
            if raw.is_zero() {
                continue;
            }

            items.push(TokenItem {
                token: TokenInfo {
                    address: token.address.clone(),
                    decimals: Some(token.decimals.clone()),
                    exchange_rate: None,
                    icon_url: None,
                    name: token.name.clone(),
                    symbol: token.symbol.clone(),
                    token_type: ERC20.to_string(),
                    holders: Some("0".to_string()),
                    total_supply: Some("0".to_string()),
                    circulating_market_cap: None,
                    volume_24h: None,
                },
                token_id: None,
                token_instance: None,
                value: Some(raw.to_string()),
            });
        }
        items
    }
}

/// Deduplicates contract addresses from a transfer history, keeping the
/// first-seen casing and metadata, in encounter order.
fn collect_unique_tokens(transfers: &[TokenTransfer]) -> Vec<KnownToken> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for transfer in transfers {
        let Some(address) = transfer
            .contract_address
            .as_deref()
            .filter(|a| !a.is_empty())
        else {
            continue;
        };

        if seen.insert(address.to_lowercase()) {
            tokens.push(KnownToken {
                address: address.to_string(),
                decimals: transfer
                    .token_decimal
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "18".to_string()),
                symbol: transfer.token_symbol.clone().unwrap_or_default(),
                name: transfer.token_name.clone().unwrap_or_default(),
            });
        }
    }

    tokens
}

/// Filter/format stage: keeps positive-balance ERC-20 items in discovery
/// order and converts them into output tokens.
fn finalize(items: Vec<TokenItem>) -> Vec<Token> {
    items
        .into_iter()
        .filter_map(|item| {
            let raw = parse_raw_balance(item.value.as_deref().unwrap_or("0"));
            if item.token.token_type != ERC20 || raw.is_zero() {
                debug!(
                    "Filtered out token {} (type {}, value {:?})",
                    item.token.address, item.token.token_type, item.value
                );
                return None;
            }

            let decimals = parse_decimals(item.token.decimals.as_deref());
            let balance = format_balance(&raw, decimals);
            let price = item
                .token
                .exchange_rate
                .as_deref()
                .and_then(|rate| rate.parse::<f64>().ok())
                .filter(|p| p.is_finite())
                .unwrap_or(0.0);

            Some(Token {
                address: item.token.address,
                symbol: item.token.symbol,
                name: item.token.name,
                decimals,
                balance,
                raw_balance: raw,
                logo_uri: item.token.icon_url,
                price,
            })
        })
        .collect()
}

#[async_trait]
impl TokenDiscovery for EtherscanTokenDiscovery {
    async fn discover_tokens(
        &self,
        address: &str,
        chain: &Chain,
    ) -> Result<Vec<Token>, SweepError> {
        let items = if self.config.use_mocks {
            info!("Serving mock token dataset for {}", shorten_address(address));
            TOKENS_MOCK.clone()
        } else {
            if !SUPPORTED_CHAINS.contains(&chain.id) {
                return Err(SweepError::UnsupportedChain {
                    id: chain.id,
                    name: chain.name.clone(),
                });
            }
            if self.config.etherscan_api_key.is_empty() {
                return Err(SweepError::MissingApiKey);
            }

            info!(
                "Discovering tokens for {} on chain {} ({})",
                shorten_address(address),
                chain.id,
                chain.name
            );

            match self.fetch_aggregated(address, chain.id).await {
                Some(items) => items,
                None => {
                    info!("Aggregated endpoint unusable, falling back to v1 history scan");
                    let transfers = self.fetch_transfer_history(address, chain.id).await?;
                    let unique = collect_unique_tokens(&transfers);
                    debug!(
                        "{} transfers referencing {} unique tokens",
                        transfers.len(),
                        unique.len()
                    );
                    self.fetch_balances(address, chain.id, &unique).await
                }
            }
        };

        info!("{} raw items before filtering", items.len());
        let tokens = finalize(items);
        info!("{} ERC-20 tokens with positive balance", tokens.len());

        Ok(tokens)
    }
}
