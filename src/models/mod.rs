mod household;
mod meal;
mod schedule;

pub use household::{parse_preference_list, Household, HouseholdRecord};
pub use meal::{parse_serving_options, slugify_meal_id, MealReference, MealSlot};
pub use schedule::{CycleSummary, DayAllocation, HouseholdMenu, SlotFailure};
