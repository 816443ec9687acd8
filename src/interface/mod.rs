pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan_request, match_meal, prompt_meal_slot, prompt_preferences, prompt_residents,
    prompt_serving_size, prompt_yes_no, MealMatch, PlanRequest,
};
pub use render::{
    display_household_menu, display_popularity, display_schedule, display_summary, meal_label,
};
