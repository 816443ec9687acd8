use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{PlanError, Result};
use crate::models::{
    parse_serving_options, slugify_meal_id, Household, HouseholdMenu, HouseholdRecord,
    MealReference, MealSlot,
};
use crate::state::MealCatalog;

/// Batch-size overrides: home id → slot → meal id → batch size.
pub type ServingOverrides = HashMap<String, HashMap<MealSlot, HashMap<String, u32>>>;

/// A catalog entry as stored by the meal upload. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default, rename = "type")]
    meal_type: Option<String>,

    #[serde(default)]
    servings: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    breakfast: Vec<CatalogEntry>,

    #[serde(default)]
    lunch: Vec<CatalogEntry>,

    #[serde(default)]
    dinner: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
struct CatalogSections<'a> {
    breakfast: Vec<&'a MealReference>,
    lunch: Vec<&'a MealReference>,
    dinner: Vec<&'a MealReference>,
}

impl CatalogEntry {
    fn into_meal(self, section: MealSlot) -> Option<MealReference> {
        let slot = match self.meal_type.as_deref().filter(|t| !t.trim().is_empty()) {
            None => section,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(%section, meal_type = raw, "Unknown meal type, using catalog section");
                section
            }),
        };

        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        let id = self
            .id
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| slugify_meal_id(&name));

        if id.is_empty() {
            warn!(%slot, "Dropping catalog entry without id or name");
            return None;
        }

        let name = if name.is_empty() { id.clone() } else { name };
        let options = parse_serving_options(self.servings.as_ref());
        Some(MealReference::new(&id, &name, slot, options))
    }
}

/// Load the meal catalog from a JSON file with one section per meal slot.
///
/// An entry's own `type` decides its slot; the section it appears in is the
/// fallback when `type` is missing or unrecognized.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<MealCatalog> {
    let content = fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&content)?;

    let sections = [
        (MealSlot::Breakfast, file.breakfast),
        (MealSlot::Lunch, file.lunch),
        (MealSlot::Dinner, file.dinner),
    ];

    let meals: Vec<MealReference> = sections
        .into_iter()
        .flat_map(|(slot, entries)| entries.into_iter().filter_map(move |e| e.into_meal(slot)))
        .collect();

    let catalog = MealCatalog::new(meals);
    info!(meals = catalog.len(), "Loaded meal catalog");
    Ok(catalog)
}

/// Save the catalog in the same sectioned layout `load_catalog` reads.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &MealCatalog) -> Result<()> {
    let sections = CatalogSections {
        breakfast: catalog.meals_for(MealSlot::Breakfast),
        lunch: catalog.meals_for(MealSlot::Lunch),
        dinner: catalog.meals_for(MealSlot::Dinner),
    };
    let json = serde_json::to_string_pretty(&sections)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the household roster from a CSV file.
pub fn load_households<P: AsRef<Path>>(path: P) -> Result<Vec<Household>> {
    let file = fs::File::open(path)?;
    parse_households(file)
}

/// Parse roster CSV. Invalid rows are skipped with a warning; an input with
/// no valid rows is an error.
pub fn parse_households<R: Read>(reader: R) -> Result<Vec<Household>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut households = Vec::new();
    for (idx, record) in csv_reader.deserialize::<HouseholdRecord>().enumerate() {
        let row = idx + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row, error = %e, "Skipping unreadable household row");
                continue;
            }
        };
        match Household::from_record(row, record) {
            Ok(household) => households.push(household),
            Err(e) => warn!(row, error = %e, "Skipping household row"),
        }
    }

    if households.is_empty() {
        return Err(PlanError::NoHouseholds);
    }

    info!(households = households.len(), "Loaded household roster");
    Ok(households)
}

/// Load per-household serving-size overrides from JSON.
pub fn load_serving_overrides<P: AsRef<Path>>(path: P) -> Result<ServingOverrides> {
    let content = fs::read_to_string(path)?;
    let overrides: ServingOverrides = serde_json::from_str(&content)?;
    Ok(overrides)
}

/// Export generated menus as pretty JSON.
pub fn save_menus<P: AsRef<Path>>(path: P, menus: &[HouseholdMenu]) -> Result<()> {
    let json = serde_json::to_string_pretty(menus)?;
    fs::write(path, json)?;
    Ok(())
}
