mod chain;
mod sweep_error;
mod token;

pub use chain::Chain;
pub use sweep_error::SweepError;
pub use token::Token;
