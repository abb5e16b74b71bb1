//! Sequential batch upload pipeline and the in-memory content transport.

pub mod orchestrator;
pub mod transport;

pub use orchestrator::UploadOrchestrator;
pub use transport::MemoryTransport;
