use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::MealSlot;

/// A raw roster row as it appears in the households CSV.
///
/// Every column is optional here; `Household::from_record` decides what is
/// usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdRecord {
    #[serde(default)]
    pub home_id: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub residents: Option<String>,

    #[serde(default)]
    pub breakfast_preferences: Option<String>,

    #[serde(default)]
    pub lunch_preferences: Option<String>,

    #[serde(default)]
    pub dinner_preferences: Option<String>,

    #[serde(default)]
    pub dietary_restrictions: Option<String>,
}

/// A validated household: the unit of demand for the cycle generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub home_id: String,
    pub phone: Option<String>,
    pub residents: u32,
    pub dietary_restrictions: String,
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
}

impl Household {
    pub fn new(home_id: &str, residents: u32) -> Self {
        Self {
            home_id: home_id.to_string(),
            phone: None,
            residents,
            dietary_restrictions: "none".to_string(),
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
        }
    }

    /// Builder-style setter for one slot's preference list.
    pub fn with_preferences(mut self, slot: MealSlot, ids: &[&str]) -> Self {
        *self.preferences_mut(slot) = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Validate a raw CSV row. `row` is the 1-based data row, used in errors.
    pub fn from_record(row: usize, record: HouseholdRecord) -> Result<Self> {
        let home_id = non_empty(record.home_id).ok_or_else(|| PlanError::InvalidHousehold {
            row,
            reason: "missing home_id".to_string(),
        })?;

        let residents_raw =
            non_empty(record.residents).ok_or_else(|| PlanError::InvalidHousehold {
                row,
                reason: "missing residents".to_string(),
            })?;

        let residents: u32 = residents_raw
            .parse()
            .map_err(|_| PlanError::InvalidHousehold {
                row,
                reason: format!("residents is not a whole number: {}", residents_raw),
            })?;

        if residents == 0 {
            return Err(PlanError::InvalidHousehold {
                row,
                reason: "residents must be at least 1".to_string(),
            });
        }

        Ok(Self {
            home_id,
            phone: non_empty(record.phone),
            residents,
            dietary_restrictions: non_empty(record.dietary_restrictions)
                .unwrap_or_else(|| "none".to_string()),
            breakfast: parse_preference_list(record.breakfast_preferences.as_deref()),
            lunch: parse_preference_list(record.lunch_preferences.as_deref()),
            dinner: parse_preference_list(record.dinner_preferences.as_deref()),
        })
    }

    pub fn preferences(&self, slot: MealSlot) -> &[String] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    fn preferences_mut(&mut self, slot: MealSlot) -> &mut Vec<String> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// Phone number if known, otherwise the home id.
    pub fn contact(&self) -> &str {
        self.phone.as_deref().unwrap_or(&self.home_id)
    }
}

/// Split a comma-delimited preference cell into meal ids.
pub fn parse_preference_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
