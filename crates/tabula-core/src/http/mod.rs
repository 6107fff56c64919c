//! HTTP transport
//!
//! Every network round trip goes through the [`HttpTransport`] trait so the
//! record store and the forms can be driven by an in-memory transport in
//! tests. [`ReqwestTransport`] is the production implementation and
//! [`RetryingTransport`] layers retries for idempotent requests on top.

mod reqwest_transport;
mod retrying;
mod transport;
mod types;

pub use reqwest_transport::ReqwestTransport;
pub use retrying::RetryingTransport;
pub use transport::{HttpTransport, SharedTransport};
#[cfg(test)]
pub use transport::MockHttpTransport;
pub use types::{ApiRequest, ApiResponse, Method};
