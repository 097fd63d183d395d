//! CLI command implementations
//!
//! Commands are organized by forecaster:
//! - `core` - Shared utilities (config loading, JSON output)
//! - `series` - Time-series forecast command
//! - `budget` - Budget forecast command
//! - `revenue` - Revenue forecast command
//! - `config` - Configuration display commands

pub mod budget;
pub mod config;
pub mod core;
pub mod revenue;
pub mod series;

// Re-export command functions for main.rs
pub use budget::*;
pub use config::*;
pub use core::*;
pub use revenue::*;
pub use series::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
