//! Background worker for vault calls.
//!
//! The plugin thread must never block, so every vault and file operation runs
//! on a Zellij worker thread and reports back through a message.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: The worker and its request dispatch

pub mod handler;
pub mod messages;

pub use handler::VaultWorker;
pub use messages::{TraceContext, VaultTarget, WorkerMessage, WorkerResponse};
