use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::models::{Household, HouseholdMenu, MealSlot, SlotFailure};
use crate::planner::cycle::{generate_cycle_with, CycleConfig};
use crate::planner::popularity::rank_by_popularity;
use crate::state::{MealCatalog, ServingOverrides};

/// Options for a roster-wide generation run.
#[derive(Debug, Clone, Default)]
pub struct RosterOptions {
    pub cycle: CycleConfig,
    /// Only generate this slot when set.
    pub slot: Option<MealSlot>,
    /// Reorder each household's preferences by roster-wide popularity first.
    pub rank_by_popularity: bool,
}

impl RosterOptions {
    fn slots(&self) -> Vec<MealSlot> {
        match self.slot {
            Some(slot) => vec![slot],
            None => MealSlot::ALL.to_vec(),
        }
    }
}

/// Generate every subscribed slot for every household.
///
/// A slot that fails is recorded on that household's menu and does not
/// affect any other slot or household. Slots with no preferences are skipped.
pub fn generate_household_menus(
    households: &[Household],
    catalog: &MealCatalog,
    overrides: &ServingOverrides,
    options: &RosterOptions,
) -> Vec<HouseholdMenu> {
    let empty = HashMap::new();
    let mut menus = Vec::with_capacity(households.len());

    for household in households {
        let mut menu = HouseholdMenu::new(&household.home_id, household.residents);

        for slot in options.slots() {
            let preferences = household.preferences(slot);
            if preferences.is_empty() {
                debug!(home_id = %household.home_id, %slot, "No preferences, slot skipped");
                continue;
            }

            let ranked;
            let preferences = if options.rank_by_popularity {
                ranked = rank_by_popularity(preferences, households, slot);
                ranked.as_slice()
            } else {
                preferences
            };

            let serving_sizes = overrides
                .get(&household.home_id)
                .and_then(|by_slot| by_slot.get(&slot))
                .unwrap_or(&empty);

            match generate_cycle_with(
                &options.cycle.for_slot(slot),
                preferences,
                serving_sizes,
                household.residents,
                catalog,
            ) {
                Ok(days) => {
                    menu.schedules.insert(slot, days);
                }
                Err(e) => {
                    warn!(home_id = %household.home_id, %slot, error = %e, "Could not generate schedule");
                    menu.failures.push(SlotFailure {
                        slot,
                        reason: e.to_string(),
                    });
                }
            }
        }

        menus.push(menu);
    }

    let failed = menus.iter().filter(|m| !m.is_complete()).count();
    info!(households = menus.len(), failed, "Generated household menus");

    menus
}
