use lazy_static::lazy_static;

use crate::explorer::models::{TokenInfo, TokenItem, ERC20};

fn mock_item(
    address: &str,
    symbol: &str,
    name: &str,
    decimals: &str,
    token_type: &str,
    exchange_rate: Option<&str>,
    icon_url: Option<&str>,
    value: &str,
) -> TokenItem {
    TokenItem {
        token: TokenInfo {
            address: address.to_string(),
            decimals: Some(decimals.to_string()),
            exchange_rate: exchange_rate.map(str::to_string),
            icon_url: icon_url.map(str::to_string),
            name: name.to_string(),
            symbol: symbol.to_string(),
            token_type: token_type.to_string(),
            holders: Some("0".to_string()),
            total_supply: Some("0".to_string()),
            circulating_market_cap: None,
            volume_24h: None,
        },
        token_id: None,
        token_instance: None,
        value: Some(value.to_string()),
    }
}

lazy_static! {
    /// Static dataset served verbatim when the mock flag is set. Includes a
    /// non-fungible entry and a zero balance so mock mode exercises the
    /// filter the same way live data does.
    pub static ref TOKENS_MOCK: Vec<TokenItem> = vec![
        mock_item(
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            "USDC",
            "USD Coin",
            "6",
            ERC20,
            Some("1.0"),
            Some("https://assets.example.org/usdc.png"),
            "12500000",
        ),
        mock_item(
            "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            "DAI",
            "Dai Stablecoin",
            "18",
            ERC20,
            Some("0.9998"),
            None,
            "1843500000000000000",
        ),
        mock_item(
            "0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE",
            "SHIB",
            "Shiba Inu",
            "18",
            ERC20,
            Some("0.00001012"),
            None,
            "420690000000000000000000",
        ),
        mock_item(
            "0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D",
            "BAYC",
            "Bored Ape Yacht Club",
            "0",
            "ERC-721",
            None,
            None,
            "1",
        ),
        mock_item(
            "0xdAC17F958D2ee523a2206206994597C13D831ec7",
            "USDT",
            "Tether USD",
            "6",
            ERC20,
            Some("1.0"),
            None,
            "0",
        ),
    ];
}
