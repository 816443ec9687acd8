use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{Household, MealSlot};
use crate::state::MealCatalog;

/// How many households list a meal in one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularityEntry {
    pub meal_id: String,
    pub meal_name: String,
    pub count: usize,
    /// Contact (phone, else home id) of each listing household.
    pub homes: Vec<String>,
}

/// Count households per meal id for one slot, ignoring repeats within a household.
pub fn preference_counts(households: &[Household], slot: MealSlot) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for household in households {
        let unique: HashSet<&str> = household
            .preferences(slot)
            .iter()
            .map(String::as_str)
            .collect();
        for id in unique {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

/// Catalog meals ranked by how many households list them.
///
/// Ids unknown to the catalog or served in another slot are left out. Ties
/// sort by meal name, then id.
pub fn meal_popularity(
    households: &[Household],
    slot: MealSlot,
    catalog: &MealCatalog,
) -> Vec<PopularityEntry> {
    tally(households, slot, catalog, |_| true)
}

/// Like [`meal_popularity`], restricted to the meals one household lists.
pub fn home_popularity(
    home_id: &str,
    households: &[Household],
    slot: MealSlot,
    catalog: &MealCatalog,
) -> Vec<PopularityEntry> {
    let Some(home) = households.iter().find(|h| h.home_id == home_id) else {
        return Vec::new();
    };
    let wanted: HashSet<&str> = home.preferences(slot).iter().map(String::as_str).collect();

    tally(households, slot, catalog, |id| wanted.contains(id))
}

/// Reorder preference ids so the most widely listed come first.
///
/// The sort is stable: equally popular meals keep their original order.
pub fn rank_by_popularity(
    preferences: &[String],
    households: &[Household],
    slot: MealSlot,
) -> Vec<String> {
    let counts = preference_counts(households, slot);
    let mut ranked = preferences.to_vec();
    ranked.sort_by_key(|id| std::cmp::Reverse(counts.get(id.as_str()).copied().unwrap_or(0)));
    ranked
}

fn tally<F>(
    households: &[Household],
    slot: MealSlot,
    catalog: &MealCatalog,
    include: F,
) -> Vec<PopularityEntry>
where
    F: Fn(&str) -> bool,
{
    let mut entries: HashMap<&str, PopularityEntry> = HashMap::new();

    for household in households {
        let mut seen = HashSet::new();
        for id in household.preferences(slot) {
            if !include(id.as_str()) || !seen.insert(id.as_str()) {
                continue;
            }
            let Some(meal) = catalog.get_in_slot(slot, id) else {
                continue;
            };

            let entry = entries.entry(meal.id.as_str()).or_insert_with(|| PopularityEntry {
                meal_id: meal.id.clone(),
                meal_name: meal.name.clone(),
                count: 0,
                homes: Vec::new(),
            });
            entry.count += 1;
            entry.homes.push(household.contact().to_string());
        }
    }

    let mut ranked: Vec<PopularityEntry> = entries.into_values().collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.meal_name.cmp(&b.meal_name))
            .then_with(|| a.meal_id.cmp(&b.meal_id))
    });
    ranked
}
