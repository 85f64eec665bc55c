//! State persistence backends.

pub mod file;
pub mod tracker_issue;

pub use file::FileStateStore;
pub use tracker_issue::TrackerStateStore;
