pub mod config;
pub mod logging;
pub mod geo;

pub use config::Config;
pub use logging::init_logging;
