//! Client side of the chemical-data upload page: captures the upload form,
//! posts it to the server's `/upload` endpoint and renders the per-record
//! status list into the results container.

pub mod client;
pub mod config;
pub mod errors;
pub mod handler;
pub mod models;
pub mod page;

pub use client::{HttpTransport, UploadTransport};
pub use config::UploaderConfig;
pub use errors::UploadError;
pub use handler::{SubmissionHandler, SubmissionOutcome};
