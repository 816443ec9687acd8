use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::MealSlot;

/// One day of a generated meal cycle.
///
/// `meal_id` and `meal_name` always name the dish that owns the batch being
/// eaten, including on leftover days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAllocation {
    /// 1-based day within the cycle.
    pub day: u32,

    pub meal_id: String,

    pub meal_name: String,

    pub meal_type: MealSlot,

    /// Servings yielded by the active batch when it was cooked.
    pub batch_size: u32,

    /// Servings eaten today.
    pub servings_used: u32,

    pub cooked_new: bool,

    pub leftover_before: u32,

    pub leftover_after: u32,

    /// Running total of servings banked by cook events so far.
    pub total_leftover: u64,

    /// Day the active batch was cooked.
    pub from_day: u32,
}

/// Waste and coverage figures for one generated cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub cook_days: u32,
    pub leftover_days: u32,
    pub servings_cooked: u64,
    pub servings_eaten: u64,
    /// Servings short of a full day's need, summed over partial days.
    pub shortfall_servings: u64,
    /// Servings still banked after the last day.
    pub unused_at_end: u32,
    pub distinct_meals: usize,
}

impl CycleSummary {
    pub fn from_days(days: &[DayAllocation], residents: u32) -> Self {
        let mut summary = CycleSummary::default();
        let mut meals = HashSet::new();

        for day in days {
            if day.cooked_new {
                summary.cook_days += 1;
                summary.servings_cooked += u64::from(day.batch_size);
            } else {
                summary.leftover_days += 1;
            }
            summary.servings_eaten += u64::from(day.servings_used);
            summary.shortfall_servings += u64::from(residents.saturating_sub(day.servings_used));
            meals.insert(day.meal_id.as_str());
        }

        summary.unused_at_end = days.last().map(|d| d.leftover_after).unwrap_or(0);
        summary.distinct_meals = meals.len();
        summary
    }

    /// Share of cooked servings left uneaten when the cycle ends.
    pub fn waste_ratio(&self) -> f64 {
        if self.servings_cooked == 0 {
            return 0.0;
        }
        self.unused_at_end as f64 / self.servings_cooked as f64
    }
}

/// A slot that could not be scheduled for a household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotFailure {
    pub slot: MealSlot,
    pub reason: String,
}

/// Every schedule generated for one household.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdMenu {
    pub home_id: String,
    pub residents: u32,
    pub schedules: BTreeMap<MealSlot, Vec<DayAllocation>>,
    pub failures: Vec<SlotFailure>,
}

impl HouseholdMenu {
    pub fn new(home_id: &str, residents: u32) -> Self {
        Self {
            home_id: home_id.to_string(),
            residents,
            schedules: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    pub fn schedule(&self, slot: MealSlot) -> Option<&[DayAllocation]> {
        self.schedules.get(&slot).map(Vec::as_slice)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    fn day(day: u32, meal: &str, cooked: bool, used: u32, after: u32, batch: u32) -> DayAllocation {
        DayAllocation {
            day,
            meal_id: meal.to_string(),
            meal_name: meal.to_string(),
            meal_type: MealSlot::Dinner,
            batch_size: batch,
            servings_used: used,
            cooked_new: cooked,
            leftover_before: 0,
            leftover_after: after,
            total_leftover: 0,
            from_day: 1,
        }
    }

    #[test]
    fn test_summary_counts() {
        let days = vec![
            day(1, "a", true, 4, 2, 6),
            day(2, "a", false, 2, 0, 6),
            day(3, "b", true, 4, 4, 8),
        ];
        let summary = CycleSummary::from_days(&days, 4);

        assert_eq!(summary.cook_days, 2);
        assert_eq!(summary.leftover_days, 1);
        assert_eq!(summary.servings_cooked, 14);
        assert_eq!(summary.servings_eaten, 10);
        assert_eq!(summary.shortfall_servings, 2);
        assert_eq!(summary.unused_at_end, 4);
        assert_eq!(summary.distinct_meals, 2);
        assert_float_absolute_eq!(summary.waste_ratio(), 4.0 / 14.0, 1e-9);
    }

    #[test]
    fn test_summary_handles_huge_batches() {
        let size = 200_000_000;
        let days: Vec<DayAllocation> = (1..=28).map(|n| day(n, "a", true, size, 0, size)).collect();
        let summary = CycleSummary::from_days(&days, size);

        assert_eq!(summary.servings_cooked, 28 * 200_000_000);
        assert_eq!(summary.servings_eaten, 28 * 200_000_000);
        assert_eq!(summary.shortfall_servings, 0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = CycleSummary::from_days(&[], 4);
        assert_eq!(summary, CycleSummary::default());
        assert_float_absolute_eq!(summary.waste_ratio(), 0.0, 1e-9);
    }
}
