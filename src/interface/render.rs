use crate::models::{CycleSummary, DayAllocation, HouseholdMenu, MealSlot};
use crate::planner::constants::LEFTOVER_LABEL;
use crate::planner::PopularityEntry;

/// Label for the meal column: the dish on cook days, the leftover label otherwise.
pub fn meal_label(day: &DayAllocation) -> String {
    if day.cooked_new {
        day.meal_name.clone()
    } else {
        format!("{} ({}, day {})", LEFTOVER_LABEL, day.meal_name, day.from_day)
    }
}

/// Display one slot's cycle as a day-by-day table.
pub fn display_schedule(slot: MealSlot, days: &[DayAllocation]) {
    if days.is_empty() {
        println!("No {} schedule generated.", slot);
        return;
    }

    println!();
    println!("=== {} ===", capitalize(slot.as_str()));
    println!();

    let labels: Vec<String> = days.iter().map(meal_label).collect();
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(10);

    println!(
        "{:>3}  {:<width$}  {:>5}  {:>4}  {:>4}",
        "Day",
        "Meal",
        "Batch",
        "Used",
        "Left",
        width = width
    );

    for (day, label) in days.iter().zip(&labels) {
        let batch = if day.cooked_new {
            day.batch_size.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:>3}  {:<width$}  {:>5}  {:>4}  {:>4}",
            day.day,
            label,
            batch,
            day.servings_used,
            day.leftover_after,
            width = width
        );
    }
}

/// Display waste and coverage figures for one cycle.
pub fn display_summary(summary: &CycleSummary) {
    println!();
    println!("--- Summary ---");
    println!("Cook days: {}", summary.cook_days);
    println!("Leftover days: {}", summary.leftover_days);
    println!("Servings cooked: {}", summary.servings_cooked);
    println!("Servings eaten: {}", summary.servings_eaten);
    if summary.shortfall_servings > 0 {
        println!("Shortfall servings: {}", summary.shortfall_servings);
    }
    println!(
        "Unused at cycle end: {} ({:.1}%)",
        summary.unused_at_end,
        summary.waste_ratio() * 100.0
    );
    println!("Distinct meals: {}", summary.distinct_meals);
    println!();
}

/// Display every schedule for one household, followed by its failures.
pub fn display_household_menu(menu: &HouseholdMenu, summary_only: bool) {
    println!();
    println!(
        "##### Home {} ({} residents) #####",
        menu.home_id, menu.residents
    );

    for (slot, days) in &menu.schedules {
        if summary_only {
            println!();
            println!("{}:", capitalize(slot.as_str()));
        } else {
            display_schedule(*slot, days);
        }
        display_summary(&CycleSummary::from_days(days, menu.residents));
    }

    for failure in &menu.failures {
        println!("  [{}] not generated: {}", failure.slot, failure.reason);
    }
}

/// Display a popularity ranking.
pub fn display_popularity(entries: &[PopularityEntry], title: &str) {
    if entries.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} meals) ===", title, entries.len());
    println!();

    let width = entries.iter().map(|e| e.meal_name.len()).max().unwrap_or(10);
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} - {} home(s): {}",
            i + 1,
            entry.meal_name,
            entry.count,
            entry.homes.join(", "),
            width = width
        );
    }

    println!();
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
