use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Preference list is empty")]
    EmptyPreferences,

    #[error("Resident count must be at least 1")]
    InvalidResidentCount,

    #[error("Batch size {batch_size} of '{meal_id}' cannot feed {residents} residents")]
    UndersizedBatch {
        meal_id: String,
        batch_size: u32,
        residents: u32,
    },

    #[error("No preference resolves to a catalog meal (day {day})")]
    NoResolvableMeals { day: u32 },

    #[error("Invalid household on row {row}: {reason}")]
    InvalidHousehold { row: usize, reason: String },

    #[error("No valid households found")]
    NoHouseholds,
}

pub type Result<T> = std::result::Result<T, PlanError>;
