//! Dust sweeper token discovery - command line entry point
//!
//! Runs one discovery call for a wallet address and prints the normalized
//! ERC-20 holdings the sweeping flow would operate on.
use anyhow::Context;
use dotenv::dotenv;
use dust_sweeper::{
    shorten_address, validate_evm_address, AppConfig, Chain, EtherscanTokenDiscovery,
    TokenDiscovery,
};
use log::info;
use std::env;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let address = args
        .next()
        .context("usage: dust-sweeper <wallet-address> [chain-id]")?;
    let chain_id: u64 = match args.next() {
        Some(raw) => raw.parse().context("chain id must be an integer")?,
        None => 1,
    };

    if !validate_evm_address(&address) {
        anyhow::bail!("Invalid EVM address: {}", address);
    }

    let chain = match chain_id {
        1 => Chain::ethereum(),
        8453 => Chain::base(),
        other => Chain::new(other, "Unknown", ""),
    };

    let config = AppConfig::from_env();
    let discovery = EtherscanTokenDiscovery::new(config);

    info!("Starting token discovery on {} ({})", chain.name, chain.id);
    let tokens = discovery.discover_tokens(&address, &chain).await?;

    if tokens.is_empty() {
        println!("No ERC-20 dust found for {}", shorten_address(&address));
        return Ok(());
    }

    println!("Tokens held by {}:", shorten_address(&address));
    for token in &tokens {
        println!(
            "{:<12} {:>20}  {}  (${:.4})",
            token.symbol, token.balance, token.address, token.price
        );
    }

    Ok(())
}
