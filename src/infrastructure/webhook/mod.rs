//! Webhook surface: signature validation and the event server.

pub mod server;
pub mod signature;

pub use server::run_server;
