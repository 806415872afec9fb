// src/explorer/mod.rs
pub mod balance;
pub mod batch;
pub mod discovery_service;
pub mod mocks;
pub mod models;

// Re-export for convenience
pub use balance::{format_balance, parse_decimals, parse_raw_balance, DEFAULT_DECIMALS, DISPLAY_DECIMALS};
pub use batch::PacedBatches;
pub use discovery_service::{EtherscanTokenDiscovery, TokenDiscovery, SUPPORTED_CHAINS};
pub use mocks::TOKENS_MOCK;
pub use models::{
    AggregatedResponse, AlternateEntry, AlternateResponse, BalanceMultiResponse,
    CanonicalResponse, TokenInfo, TokenItem, TokenTransfer, TransferListResponse, ERC20,
};
