pub mod handlers;
pub mod logging;
