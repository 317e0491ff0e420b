pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::{PayloadEncoding, ResolverConfig, DEFAULT_RESOLVER_URL};
pub use root::{CliOverrides, Config};
