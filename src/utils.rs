use lazy_static::lazy_static;
use regex::Regex;

// Validate an EVM address (0x followed by 40 hex characters)
pub fn validate_evm_address(address: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
    }

    RE.is_match(address)
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }

    let start = &address[..6];
    let end = &address[address.len() - 4..];

    format!("{}...{}", start, end)
}
