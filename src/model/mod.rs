pub mod client;

pub use client::{GenerativeModel, ModelClient, ModelClientError, StructuredRequest};
