pub mod builder;
pub mod client;
pub mod error;
pub mod payload;
pub mod transport;

pub use builder::QueryBuilder;
pub use client::CatalogClient;
pub use error::{CatalogError, TransportError};
pub use payload::{Address, UpstreamPayload};
pub use transport::{BrowserTransport, RawResponse, Transport};
