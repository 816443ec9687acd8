pub mod allocation;
pub mod constants;
pub mod cycle;
pub mod households;
pub mod popularity;

pub use allocation::{ActiveBatch, BatchState, LeftoverPolicy};
pub use constants::*;
pub use cycle::{generate_cycle, generate_cycle_with, resolve_batch_size, validate_inputs, CycleConfig};
pub use households::{generate_household_menus, RosterOptions};
pub use popularity::{
    home_popularity, meal_popularity, preference_counts, rank_by_popularity, PopularityEntry,
};
