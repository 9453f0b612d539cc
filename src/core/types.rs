//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Milliseconds on the caller's clock, used for action cooldowns
pub type Timestamp = u64;

/// Which side of the ring a fighter starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    Red,
    Green,
}

impl Corner {
    pub const BOTH: [Corner; 2] = [Corner::Red, Corner::Green];

    /// The corner across the ring
    pub fn opponent(self) -> Corner {
        match self {
            Corner::Red => Corner::Green,
            Corner::Green => Corner::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::Red => "Red",
            Corner::Green => "Green",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
