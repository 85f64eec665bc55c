//! Service layer: the reconciliation core.

pub mod sync;

pub use sync::SyncService;
