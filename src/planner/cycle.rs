use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{PlanError, Result};
use crate::models::{DayAllocation, MealReference, MealSlot};
use crate::planner::allocation::{BatchState, LeftoverPolicy};
use crate::planner::constants::CYCLE_LENGTH;
use crate::state::MealCatalog;

/// Knobs for one cycle generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    pub cycle_length: u32,
    pub policy: LeftoverPolicy,
    /// Slot being planned. Preferences served in another slot are skipped.
    pub slot: Option<MealSlot>,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            cycle_length: CYCLE_LENGTH,
            policy: LeftoverPolicy::default(),
            slot: None,
        }
    }
}

impl CycleConfig {
    pub fn with_policy(policy: LeftoverPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn for_slot(self, slot: MealSlot) -> Self {
        Self {
            slot: Some(slot),
            ..self
        }
    }

    /// Resolve a preference id against the catalog, honoring the slot.
    pub fn resolve<'c>(&self, catalog: &'c MealCatalog, id: &str) -> Option<&'c MealReference> {
        match self.slot {
            Some(slot) => catalog.get_in_slot(slot, id),
            None => catalog.get(id),
        }
    }
}

/// Walks the preference list circularly, skipping ids that do not resolve.
struct PreferenceCursor<'p> {
    preferences: &'p [String],
    next: usize,
    reported: HashSet<&'p str>,
}

impl<'p> PreferenceCursor<'p> {
    fn new(preferences: &'p [String]) -> Self {
        Self {
            preferences,
            next: 0,
            reported: HashSet::new(),
        }
    }

    /// Next resolvable meal, trying each preference at most once.
    fn next_meal<'c>(
        &mut self,
        config: &CycleConfig,
        catalog: &'c MealCatalog,
        day: u32,
    ) -> Result<&'c MealReference> {
        let preferences = self.preferences;

        for _ in 0..preferences.len() {
            let id = preferences[self.next].as_str();
            self.next = (self.next + 1) % preferences.len();

            match config.resolve(catalog, id) {
                Some(meal) => return Ok(meal),
                None => {
                    if self.reported.insert(id) {
                        warn!(meal_id = id, day, "Skipping preference missing from catalog for this slot");
                    }
                }
            }
        }

        Err(PlanError::NoResolvableMeals { day })
    }
}

/// Batch size for one cook event: override, catalog default, then 4.
pub fn resolve_batch_size(meal: &MealReference, serving_sizes: &HashMap<String, u32>) -> u32 {
    serving_sizes
        .get(&meal.id)
        .copied()
        .unwrap_or_else(|| meal.default_serving_size())
}

/// Reject inputs that cannot produce a complete cycle.
pub fn validate_inputs(
    config: &CycleConfig,
    preferences: &[String],
    serving_sizes: &HashMap<String, u32>,
    residents: u32,
    catalog: &MealCatalog,
) -> Result<()> {
    if preferences.is_empty() {
        return Err(PlanError::EmptyPreferences);
    }
    if residents == 0 {
        return Err(PlanError::InvalidResidentCount);
    }
    if config.cycle_length == 0 {
        return Err(PlanError::InvalidInput(
            "Cycle length must be at least 1 day".to_string(),
        ));
    }

    for meal in preferences.iter().filter_map(|id| config.resolve(catalog, id)) {
        let batch_size = resolve_batch_size(meal, serving_sizes);
        if batch_size < residents {
            return Err(PlanError::UndersizedBatch {
                meal_id: meal.id.clone(),
                batch_size,
                residents,
            });
        }
    }

    Ok(())
}

/// Generate a 28-day cycle with the default leftover policy.
pub fn generate_cycle(
    preferences: &[String],
    serving_sizes: &HashMap<String, u32>,
    residents: u32,
    catalog: &MealCatalog,
) -> Result<Vec<DayAllocation>> {
    generate_cycle_with(
        &CycleConfig::default(),
        preferences,
        serving_sizes,
        residents,
        catalog,
    )
}

/// Generate a leftover-aware meal cycle for one household and one slot.
///
/// Each day either eats banked leftovers or cooks the next preference in
/// circular order. Either every day of the cycle is returned or an error.
pub fn generate_cycle_with(
    config: &CycleConfig,
    preferences: &[String],
    serving_sizes: &HashMap<String, u32>,
    residents: u32,
    catalog: &MealCatalog,
) -> Result<Vec<DayAllocation>> {
    validate_inputs(config, preferences, serving_sizes, residents, catalog)?;

    let mut state = BatchState::new(residents, config.policy);
    let mut cursor = PreferenceCursor::new(preferences);
    let mut days = Vec::with_capacity(config.cycle_length as usize);

    for day in 1..=config.cycle_length {
        let leftovers = if state.needs_cook() {
            None
        } else {
            state.eat_leftovers(day)
        };

        let allocation = match leftovers {
            Some(allocation) => allocation,
            None => {
                let meal = cursor.next_meal(config, catalog, day)?;
                let batch_size = resolve_batch_size(meal, serving_sizes);
                state.cook(day, meal, batch_size)
            }
        };

        days.push(allocation);
    }

    debug!(
        residents,
        preferences = preferences.len(),
        cook_days = days.iter().filter(|d| d.cooked_new).count(),
        "Generated meal cycle"
    );

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;

    fn catalog() -> MealCatalog {
        MealCatalog::new(vec![
            MealReference::new("a", "Meal A", MealSlot::Dinner, vec![4]),
            MealReference::new("b", "Meal B", MealSlot::Dinner, vec![4]),
            MealReference::new("c", "Meal C", MealSlot::Dinner, vec![4]),
            MealReference::new("d", "Meal D", MealSlot::Dinner, vec![6]),
            MealReference::new("big", "Big Batch", MealSlot::Dinner, vec![12, 4]),
            MealReference::new("oats", "Oatmeal", MealSlot::Breakfast, vec![2]),
        ])
    }

    fn prefs(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn sizes(entries: &[(&str, u32)]) -> HashMap<String, u32> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_resolve_batch_size() {
        let catalog = catalog();
        let big = catalog.get("big").unwrap();
        assert_eq!(resolve_batch_size(big, &HashMap::new()), 12);
        assert_eq!(resolve_batch_size(big, &sizes(&[("big", 4)])), 4);
    }

    #[test]
    fn test_every_day_cooks_when_batch_matches_residents() {
        let days = generate_cycle(&prefs(&["a"]), &sizes(&[("a", 4)]), 4, &catalog()).unwrap();

        assert_eq!(days.len(), 28);
        assert!(days.iter().all(|d| d.cooked_new && d.leftover_after == 0));
    }

    #[test]
    fn test_single_resident_carries_leftovers() {
        let days = generate_cycle(&prefs(&["a"]), &sizes(&[("a", 4)]), 1, &catalog()).unwrap();

        let after: Vec<u32> = days.iter().take(5).map(|d| d.leftover_after).collect();
        assert_eq!(after, vec![3, 2, 1, 0, 3]);
        let cooked: Vec<bool> = days.iter().take(5).map(|d| d.cooked_new).collect();
        assert_eq!(cooked, vec![true, false, false, false, true]);
        assert!(days.iter().all(|d| d.meal_id == "a"));
    }

    #[test]
    fn test_uneven_batch_has_partial_leftover_day() {
        let days = generate_cycle(&prefs(&["a"]), &sizes(&[("a", 6)]), 4, &catalog()).unwrap();

        for pair in days.chunks(2) {
            assert!(pair[0].cooked_new);
            assert_eq!(pair[0].leftover_after, 2);
            assert!(!pair[1].cooked_new);
            assert_eq!(pair[1].servings_used, 2);
            assert_eq!(pair[1].leftover_after, 0);
            assert_eq!(pair[1].from_day, pair[0].day);
        }
    }

    #[test]
    fn test_carry_over_policy_never_eats_partial_days() {
        let config = CycleConfig::with_policy(LeftoverPolicy::CarryOver);
        let days =
            generate_cycle_with(&config, &prefs(&["a"]), &sizes(&[("a", 6)]), 4, &catalog())
                .unwrap();

        let cooked: Vec<bool> = days.iter().take(6).map(|d| d.cooked_new).collect();
        assert_eq!(cooked, vec![true, true, false, true, true, false]);
        assert!(days.iter().all(|d| d.servings_used == 4));
    }

    #[test]
    fn test_skips_unknown_preferences_without_losing_days() {
        let days =
            generate_cycle(&prefs(&["ghost", "a", "b"]), &HashMap::new(), 4, &catalog()).unwrap();

        assert_eq!(days.len(), 28);
        assert_eq!(days[0].meal_id, "a");
        assert_eq!(days[1].meal_id, "b");
        assert_eq!(days[2].meal_id, "a");
    }

    #[test]
    fn test_rejects_bad_configuration() {
        let catalog = catalog();
        assert!(matches!(
            generate_cycle(&[], &HashMap::new(), 4, &catalog),
            Err(PlanError::EmptyPreferences)
        ));
        assert!(matches!(
            generate_cycle(&prefs(&["a"]), &HashMap::new(), 0, &catalog),
            Err(PlanError::InvalidResidentCount)
        ));
        assert!(matches!(
            generate_cycle(&prefs(&["a", "d"]), &HashMap::new(), 5, &catalog),
            Err(PlanError::UndersizedBatch { batch_size: 4, residents: 5, .. })
        ));

        let zero_days = CycleConfig {
            cycle_length: 0,
            ..Default::default()
        };
        assert!(generate_cycle_with(&zero_days, &prefs(&["a"]), &HashMap::new(), 1, &catalog).is_err());
    }

    #[test]
    fn test_all_unresolvable_fails_on_first_day() {
        let result = generate_cycle(&prefs(&["x", "y"]), &HashMap::new(), 2, &catalog());
        assert!(matches!(result, Err(PlanError::NoResolvableMeals { day: 1 })));
    }

    #[test]
    fn test_slot_config_skips_meals_from_other_slots() {
        let config = CycleConfig::default().for_slot(MealSlot::Breakfast);

        let result = generate_cycle_with(&config, &prefs(&["a", "b"]), &HashMap::new(), 4, &catalog());
        assert!(matches!(result, Err(PlanError::NoResolvableMeals { day: 1 })));

        let days =
            generate_cycle_with(&config, &prefs(&["a", "oats"]), &HashMap::new(), 2, &catalog())
                .unwrap();
        assert!(days.iter().all(|d| d.meal_id == "oats"));
        assert!(days.iter().all(|d| d.meal_type == MealSlot::Breakfast));
    }
}
