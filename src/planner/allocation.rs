use serde::{Deserialize, Serialize};

use crate::models::{DayAllocation, MealReference, MealSlot};

/// How banked servings interact with the decision to cook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LeftoverPolicy {
    /// Eat every banked serving before cooking again. A day with fewer banked
    /// servings than residents is a partial leftover day.
    #[default]
    DrainFirst,

    /// Cook whenever fewer than a full day's servings are banked. The fresh
    /// batch is added to what is left, so every day eats exactly `residents`.
    CarryOver,
}

/// The batch currently being eaten from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveBatch {
    pub meal_id: String,
    pub meal_name: String,
    pub meal_type: MealSlot,
    pub batch_size: u32,
    pub cooked_on: u32,
}

/// Leftover bookkeeping for one household and one meal slot.
///
/// Owns everything that changes from day to day: banked servings, the batch
/// they belong to, and the running banked total.
#[derive(Debug, Clone)]
pub struct BatchState {
    residents: u32,
    policy: LeftoverPolicy,
    leftover: u32,
    banked_total: u64,
    active: Option<ActiveBatch>,
}

impl BatchState {
    pub fn new(residents: u32, policy: LeftoverPolicy) -> Self {
        Self {
            residents,
            policy,
            leftover: 0,
            banked_total: 0,
            active: None,
        }
    }

    /// Servings banked right now.
    #[inline]
    pub fn leftover(&self) -> u32 {
        self.leftover
    }

    pub fn active(&self) -> Option<&ActiveBatch> {
        self.active.as_ref()
    }

    /// Whether today has to start with a cook event.
    pub fn needs_cook(&self) -> bool {
        if self.active.is_none() {
            return true;
        }
        match self.policy {
            LeftoverPolicy::DrainFirst => self.leftover == 0,
            LeftoverPolicy::CarryOver => self.leftover < self.residents,
        }
    }

    /// Cook a fresh batch of `meal` and eat today's servings from it.
    pub fn cook(&mut self, day: u32, meal: &MealReference, batch_size: u32) -> DayAllocation {
        let before = self.leftover;
        let available = u64::from(before) + u64::from(batch_size);
        let used = self.residents.min(u32::try_from(available).unwrap_or(u32::MAX));

        // Cooking only happens below a full day of leftovers, so the remainder
        // never exceeds the fresh batch.
        self.leftover = u32::try_from(available - u64::from(used)).unwrap_or(u32::MAX);
        self.banked_total += u64::from(batch_size.saturating_sub(self.residents));

        let batch = ActiveBatch {
            meal_id: meal.id.clone(),
            meal_name: meal.name.clone(),
            meal_type: meal.meal_type,
            batch_size,
            cooked_on: day,
        };
        let allocation = self.record(&batch, day, true, before, used);
        self.active = Some(batch);
        allocation
    }

    /// Eat today's servings from the banked leftovers.
    ///
    /// Returns `None` if nothing has been cooked yet or nothing is banked.
    pub fn eat_leftovers(&mut self, day: u32) -> Option<DayAllocation> {
        if self.leftover == 0 {
            return None;
        }
        let batch = self.active.as_ref()?;

        let before = self.leftover;
        let used = before.min(self.residents);
        let allocation = DayAllocation {
            leftover_after: before - used,
            ..self.record(batch, day, false, before, used)
        };

        self.leftover = allocation.leftover_after;
        Some(allocation)
    }

    fn record(
        &self,
        batch: &ActiveBatch,
        day: u32,
        cooked_new: bool,
        before: u32,
        used: u32,
    ) -> DayAllocation {
        DayAllocation {
            day,
            meal_id: batch.meal_id.clone(),
            meal_name: batch.meal_name.clone(),
            meal_type: batch.meal_type,
            batch_size: batch.batch_size,
            servings_used: used,
            cooked_new,
            leftover_before: before,
            leftover_after: self.leftover,
            total_leftover: self.banked_total,
            from_day: batch.cooked_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(id: &str) -> MealReference {
        MealReference::new(id, id, MealSlot::Lunch, vec![4])
    }

    #[test]
    fn test_fresh_state_needs_cook() {
        let state = BatchState::new(2, LeftoverPolicy::DrainFirst);
        assert!(state.needs_cook());
        assert_eq!(state.leftover(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_eat_leftovers_without_batch() {
        let mut state = BatchState::new(2, LeftoverPolicy::DrainFirst);
        assert!(state.eat_leftovers(1).is_none());
    }

    #[test]
    fn test_cook_banks_remainder() {
        let mut state = BatchState::new(4, LeftoverPolicy::DrainFirst);
        let day = state.cook(1, &meal("soup"), 6);

        assert!(day.cooked_new);
        assert_eq!(day.servings_used, 4);
        assert_eq!(day.leftover_before, 0);
        assert_eq!(day.leftover_after, 2);
        assert_eq!(day.total_leftover, 2);
        assert_eq!(day.from_day, 1);
        assert_eq!(state.leftover(), 2);
    }

    #[test]
    fn test_drain_first_partial_day() {
        let mut state = BatchState::new(4, LeftoverPolicy::DrainFirst);
        state.cook(1, &meal("soup"), 6);
        assert!(!state.needs_cook());

        let day = state.eat_leftovers(2).unwrap();
        assert!(!day.cooked_new);
        assert_eq!(day.meal_id, "soup");
        assert_eq!(day.servings_used, 2);
        assert_eq!(day.leftover_after, 0);
        assert_eq!(day.from_day, 1);
        assert!(state.needs_cook());
    }

    #[test]
    fn test_carry_over_merges_batches() {
        let mut state = BatchState::new(4, LeftoverPolicy::CarryOver);
        state.cook(1, &meal("soup"), 6);
        assert!(state.needs_cook());

        let day = state.cook(2, &meal("stew"), 6);
        assert_eq!(day.leftover_before, 2);
        assert_eq!(day.servings_used, 4);
        assert_eq!(day.leftover_after, 4);
        assert_eq!(day.total_leftover, 4);
        assert_eq!(state.active().unwrap().meal_id, "stew");
        assert!(!state.needs_cook());
    }

    #[test]
    fn test_carry_over_with_huge_batches() {
        let residents = u32::MAX - 1;
        let mut state = BatchState::new(residents, LeftoverPolicy::CarryOver);
        state.cook(1, &meal("soup"), u32::MAX);
        assert!(state.needs_cook());

        let day = state.cook(2, &meal("stew"), u32::MAX);
        assert_eq!(day.leftover_before, 1);
        assert_eq!(day.servings_used, residents);
        assert_eq!(day.leftover_after, 2);
        assert_eq!(day.total_leftover, 2);
    }
}
