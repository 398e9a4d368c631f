//! Proxy module
//!
//! Provider registry, request normalization, upstream invocation, and
//! response relay. The dispatcher in `routes::proxy` wires these together.

pub mod normalize;
pub mod provider;
pub mod relay;
pub mod upstream;

pub use normalize::{build_outbound, OutboundRequest};
pub use provider::{Provider, StreamSignal};
pub use relay::TransferMode;
pub use upstream::{ByteStream, UpstreamClient, UpstreamResponse};
