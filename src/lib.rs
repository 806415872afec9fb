pub mod config;
pub mod entity;
pub mod explorer;
pub mod utils;

// Re-export commonly used items
pub use config::AppConfig;
pub use entity::*;
pub use explorer::*;
pub use utils::*;
