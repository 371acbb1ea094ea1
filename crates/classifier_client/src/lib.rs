pub mod api;
pub mod client_trait;
pub mod error;
pub mod utils;

pub use api::client::HttpClassifierClient;
pub use api::models::{ClassifyRequest, ClassifyResponse};
pub use client_trait::ClassifierClient;
pub use error::ClassifierError;
pub use portal_core::Config;
