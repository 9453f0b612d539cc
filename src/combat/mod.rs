pub mod action;
pub mod constants;
pub mod exchange;
pub mod fighter;
pub mod resolution;
pub mod selection;

pub use action::{ActionProfile, ActionType};
pub use exchange::{resolve_exchange, ExchangeOutcome};
pub use fighter::{Fighter, FighterAttributes, FighterTally};
pub use resolution::{
    accuracy_endurance_factor, damage_endurance_factor, damage_for_roll, endurance_cost,
    evaded_damage, evasion_chance, hit_chance, roll_damage, roll_evasion,
};
pub use selection::{heavy_preference, initiative_weight, select_action, select_attacker};
