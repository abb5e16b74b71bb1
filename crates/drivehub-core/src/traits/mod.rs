//! Traits implemented by the collaborators the storage engine depends on.

pub mod quota;
pub mod transport;

pub use quota::QuotaSource;
pub use transport::UploadTransport;
