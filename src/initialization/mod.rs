//! Application initialization.
//!
//! The analyzers need no shared resources, so the only thing to set up is
//! the logger of the binary.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
