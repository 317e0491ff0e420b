pub mod resolver;
pub mod transport;
pub mod wire;

pub use resolver::DohResolver;
pub use transport::https::HttpsTransport;
pub use transport::{DnsTransport, TransportResponse};
