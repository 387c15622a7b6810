//! Top-level command orchestration.

pub mod stow;
pub mod version;
