pub mod config;
pub mod data;
pub mod device;
pub mod evaluation;
pub mod inference;
pub mod metrics;
pub mod model;
pub mod prelude;

pub use config::*;
pub use device::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
