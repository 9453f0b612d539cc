//! Prizefight - two-fighter bout simulation engine
//!
//! Fighters trade probabilistic attacks across rounds of exchanges; endurance
//! drains with every attempt and shapes accuracy, damage and initiative. A
//! match ends by knockout or goes to a decision after the final round.

pub mod bout;
pub mod combat;
pub mod core;
