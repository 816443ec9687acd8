use std::collections::HashMap;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::models::{MealReference, MealSlot};
use crate::planner::constants::{FUZZY_MATCH_THRESHOLD, MAX_SUGGESTIONS};
use crate::state::MealCatalog;

/// Everything the interactive session collects for one cycle.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub slot: MealSlot,
    pub residents: u32,
    pub preferences: Vec<String>,
    pub serving_sizes: HashMap<String, u32>,
}

/// Outcome of matching typed text against catalog meals.
#[derive(Debug)]
pub enum MealMatch<'a> {
    Exact(&'a MealReference),
    Suggestions(Vec<&'a MealReference>),
    NoMatch,
}

/// Match user input against meal names and ids, case-insensitively, falling
/// back to Jaro-Winkler suggestions.
pub fn match_meal<'a>(input: &str, meals: &[&'a MealReference]) -> MealMatch<'a> {
    let needle = input.trim().to_lowercase();

    if let Some(meal) = meals
        .iter()
        .copied()
        .find(|m| m.name.to_lowercase() == needle || m.id == needle)
    {
        return MealMatch::Exact(meal);
    }

    let mut candidates: Vec<(&MealReference, f64)> = meals
        .iter()
        .map(|m| (*m, jaro_winkler(&m.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        return MealMatch::NoMatch;
    }

    MealMatch::Suggestions(
        candidates
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(m, _)| m)
            .collect(),
    )
}

/// Prompt for the meal slot to plan.
pub fn prompt_meal_slot() -> Result<MealSlot> {
    let options: Vec<&str> = MealSlot::ALL.iter().map(|s| s.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Which meal slot are you planning?")
        .items(&options)
        .default(2)
        .interact()?;

    Ok(MealSlot::ALL[selection])
}

/// Prompt for the number of residents eating each day.
pub fn prompt_residents() -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("How many residents eat this meal each day?")
        .default("2".to_string())
        .interact_text()?;

    let residents: u32 = input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput("Invalid number".to_string()))?;

    if residents == 0 {
        return Err(PlanError::InvalidResidentCount);
    }

    Ok(residents)
}

/// Prompt for ranked meal preferences with fuzzy matching.
///
/// Returns meal ids in the order they were entered.
pub fn prompt_preferences(meals: &[&MealReference]) -> Result<Vec<String>> {
    let mut preferences = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Add a meal in preference order (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        match match_meal(input, meals) {
            MealMatch::Exact(meal) => {
                preferences.push(meal.id.clone());
                println!("Added: {}", meal.name);
            }
            MealMatch::NoMatch => {
                println!("No matching meal found for '{}'", input);
            }
            MealMatch::Suggestions(candidates) if candidates.len() == 1 => {
                let meal = candidates[0];
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", meal.name))
                    .default(true)
                    .interact()?;

                if confirm {
                    preferences.push(meal.id.clone());
                    println!("Added: {}", meal.name);
                }
            }
            MealMatch::Suggestions(candidates) => {
                let mut options: Vec<String> =
                    candidates.iter().map(|m| m.name.clone()).collect();
                options.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;

                if let Some(meal) = candidates.get(selection) {
                    preferences.push(meal.id.clone());
                    println!("Added: {}", meal.name);
                }
            }
        }
    }

    Ok(preferences)
}

/// Prompt for a batch size when a meal offers more than one.
pub fn prompt_serving_size(meal: &MealReference) -> Result<u32> {
    if meal.serving_options.len() <= 1 {
        return Ok(meal.default_serving_size());
    }

    let options: Vec<String> = meal
        .serving_options
        .iter()
        .map(|size| format!("{} servings", size))
        .collect();

    let selection = Select::new()
        .with_prompt(format!("Batch size for '{}'", meal.name))
        .items(&options)
        .default(0)
        .interact()?;

    Ok(meal.serving_options[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect slot, residents, preferences and batch sizes for one cycle.
pub fn collect_plan_request(catalog: &MealCatalog) -> Result<PlanRequest> {
    let slot = prompt_meal_slot()?;
    let meals = catalog.meals_for(slot);
    if meals.is_empty() {
        return Err(PlanError::InvalidInput(format!(
            "The catalog has no {} meals",
            slot
        )));
    }

    let residents = prompt_residents()?;
    let preferences = prompt_preferences(&meals)?;
    if preferences.is_empty() {
        return Err(PlanError::EmptyPreferences);
    }

    let mut serving_sizes = HashMap::new();
    for id in &preferences {
        if serving_sizes.contains_key(id) {
            continue;
        }
        let meal = catalog
            .get(id)
            .ok_or_else(|| PlanError::MealNotFound(id.clone()))?;
        serving_sizes.insert(id.clone(), prompt_serving_size(meal)?);
    }

    Ok(PlanRequest {
        slot,
        residents,
        preferences,
        serving_sizes,
    })
}
