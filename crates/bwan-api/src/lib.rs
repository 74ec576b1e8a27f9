// bwan-api: Async Rust client for the Borderless SDWAN tenant REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{EDGES_ENDPOINT, EdgeClient};
pub use error::Error;
pub use models::{ClientConfiguration, CreatedBy, Edge, EdgeList};
pub use transport::{TlsMode, TransportConfig};
