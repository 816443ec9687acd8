use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlanError;
use crate::planner::constants::DEFAULT_SERVING_SIZE;

/// One of the three daily meal slots a household subscribes to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(PlanError::InvalidInput(format!("Unknown meal slot: {}", other))),
        }
    }
}

/// A cookable dish from the meal catalog.
///
/// `serving_options` lists the batch sizes a single cooking event can yield,
/// in the order the catalog gives them. The first one is the standard batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealReference {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub meal_type: MealSlot,

    #[serde(rename = "servings", default = "default_serving_options")]
    pub serving_options: Vec<u32>,
}

impl MealReference {
    pub fn new(id: &str, name: &str, meal_type: MealSlot, serving_options: Vec<u32>) -> Self {
        let serving_options = if serving_options.is_empty() {
            default_serving_options()
        } else {
            serving_options
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            meal_type,
            serving_options,
        }
    }

    /// Standard batch size: the first serving option.
    #[inline]
    pub fn default_serving_size(&self) -> u32 {
        self.serving_options
            .first()
            .copied()
            .unwrap_or(DEFAULT_SERVING_SIZE)
    }
}

fn default_serving_options() -> Vec<u32> {
    vec![DEFAULT_SERVING_SIZE]
}

/// Derive a meal id from its display name.
///
/// Lowercases, collapses whitespace runs into `-` and drops everything outside
/// `[a-z0-9-]`.
pub fn slugify_meal_id(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Parse a catalog `servings` value into batch sizes.
///
/// Accepts a number, a list, or a comma-separated string such as `"4, 8, 12"`.
/// Zero and non-numeric pieces are dropped; an empty result falls back to the
/// standard batch.
pub fn parse_serving_options(value: Option<&Value>) -> Vec<u32> {
    let mut options = Vec::new();
    if let Some(value) = value {
        collect_serving_options(value, &mut options);
    }
    if options.is_empty() {
        return default_serving_options();
    }
    options
}

fn collect_serving_options(value: &Value, out: &mut Vec<u32>) {
    match value {
        Value::Number(n) => {
            if let Some(size) = n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                if size > 0 {
                    out.push(size);
                }
            }
        }
        Value::String(s) => {
            out.extend(
                s.split(',')
                    .filter_map(|piece| piece.trim().parse::<u32>().ok())
                    .filter(|&size| size > 0),
            );
        }
        Value::Array(items) => {
            for item in items {
                collect_serving_options(item, out);
            }
        }
        _ => {}
    }
}
