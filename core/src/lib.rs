//! # RedLilium Engine Core
//!
//! Core crate for RedLilium Engine basic utilities.

pub mod abstract_editor;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logs the core version once at startup.
pub fn init() {
    log::info!("RedLilium Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
