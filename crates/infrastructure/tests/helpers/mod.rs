#![allow(dead_code)]

mod builders;
mod doh_server_mock;
mod mock_transport;

pub use builders::WireBuilder;
pub use doh_server_mock::{MockDohServer, MockReply, RecordedRequest};
pub use mock_transport::MockTransport;
