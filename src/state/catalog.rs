use std::collections::HashMap;

use tracing::warn;

use crate::models::{MealReference, MealSlot};

/// In-memory meal catalog keyed by meal id.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    meals: HashMap<String, MealReference>,
}

impl MealCatalog {
    /// Build a catalog from a list of meals.
    ///
    /// Duplicate ids keep the last occurrence.
    pub fn new(meals: Vec<MealReference>) -> Self {
        let mut map = HashMap::new();
        for meal in meals {
            if let Some(previous) = map.insert(meal.id.clone(), meal) {
                warn!(meal_id = %previous.id, "Duplicate meal id in catalog, keeping last entry");
            }
        }
        Self { meals: map }
    }

    pub fn get(&self, id: &str) -> Option<&MealReference> {
        self.meals.get(id)
    }

    /// Look up a meal only if it is served in `slot`.
    pub fn get_in_slot(&self, slot: MealSlot, id: &str) -> Option<&MealReference> {
        self.get(id).filter(|m| m.meal_type == slot)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.meals.contains_key(id)
    }

    /// Meals served in one slot, sorted by name.
    pub fn meals_for(&self, slot: MealSlot) -> Vec<&MealReference> {
        let mut meals: Vec<&MealReference> = self
            .meals
            .values()
            .filter(|m| m.meal_type == slot)
            .collect();
        meals.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}
