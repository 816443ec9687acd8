use std::io::Write;

use meal_cycle_rs::models::MealSlot;
use meal_cycle_rs::planner::{generate_household_menus, meal_popularity, RosterOptions};
use meal_cycle_rs::state::{
    load_catalog, load_households, load_serving_overrides, save_menus, ServingOverrides,
};
use tempfile::NamedTempFile;

const CATALOG: &str = r#"{
    "breakfast": [
        {"id": "banana-nut-oatmeal", "name": "Banana Nut Oatmeal", "type": "breakfast", "servings": [4]},
        {"id": "chia-pudding", "name": "Chia Pudding", "type": "breakfast", "servings": [4, 8, 12]},
        {"name": "Strawberry Shortcake", "type": "breakfast", "servings": 12}
    ],
    "lunch": [
        {"id": "lentil-soup", "name": "Lentil Soup", "servings": "6, 12"}
    ],
    "dinner": [
        {"id": "veggie-chili", "name": "Veggie Chili", "servings": [8]}
    ]
}"#;

const HOUSEHOLDS: &str = "\
home_id,phone,residents,breakfast_preferences,lunch_preferences,dinner_preferences,dietary_restrictions
H1,555-0101,2,\"chia-pudding,banana-nut-oatmeal\",lentil-soup,veggie-chili,none
H2,555-0102,4,\"strawberry-shortcake,chia-pudding\",,veggie-chili,dairy
H3,555-0103,10,banana-nut-oatmeal,,,
,555-0104,2,chia-pudding,,,
";

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_roster_generation_end_to_end() {
    let catalog_file = temp_file(CATALOG);
    let households_file = temp_file(HOUSEHOLDS);
    let overrides_file = temp_file(r#"{"H1": {"breakfast": {"chia-pudding": 12}}}"#);

    let catalog = load_catalog(catalog_file.path()).unwrap();
    let households = load_households(households_file.path()).unwrap();
    let overrides = load_serving_overrides(overrides_file.path()).unwrap();

    assert_eq!(catalog.len(), 5);
    assert!(catalog.contains("strawberry-shortcake"));
    assert_eq!(households.len(), 3);

    let menus =
        generate_household_menus(&households, &catalog, &overrides, &RosterOptions::default());
    assert_eq!(menus.len(), 3);

    let h1 = &menus[0];
    assert!(h1.is_complete());
    assert_eq!(h1.schedules.len(), 3);
    let breakfast = h1.schedule(MealSlot::Breakfast).unwrap();
    assert_eq!(breakfast[0].meal_id, "chia-pudding");
    assert_eq!(breakfast[0].batch_size, 12);
    assert_eq!(breakfast[0].leftover_after, 10);

    let h2 = &menus[1];
    assert!(h2.is_complete());
    assert!(h2.schedule(MealSlot::Lunch).is_none());
    assert!(!h2.schedule(MealSlot::Dinner).unwrap()[1].cooked_new);

    // Ten residents outgrow a four-serving oatmeal batch.
    let h3 = &menus[2];
    assert!(!h3.is_complete());
    assert!(h3.schedules.is_empty());
    assert_eq!(h3.failures[0].slot, MealSlot::Breakfast);
}

#[test]
fn test_menus_export_as_json() {
    let catalog = load_catalog(temp_file(CATALOG).path()).unwrap();
    let households = load_households(temp_file(HOUSEHOLDS).path()).unwrap();

    let options = RosterOptions {
        slot: Some(MealSlot::Dinner),
        ..Default::default()
    };
    let menus = generate_household_menus(&households, &catalog, &ServingOverrides::new(), &options);

    let out = NamedTempFile::new().unwrap();
    save_menus(out.path(), &menus).unwrap();

    let content = std::fs::read_to_string(out.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    let first = &json[0];
    assert_eq!(first["home_id"], "H1");
    let dinner = first["schedules"]["dinner"].as_array().unwrap();
    assert_eq!(dinner.len(), 28);
    assert_eq!(dinner[0]["meal_name"], "Veggie Chili");
    assert_eq!(dinner[0]["cooked_new"], true);
    assert!(first["schedules"].get("breakfast").is_none());
}

#[test]
fn test_popularity_over_roster() {
    let catalog = load_catalog(temp_file(CATALOG).path()).unwrap();
    let households = load_households(temp_file(HOUSEHOLDS).path()).unwrap();

    let ranked = meal_popularity(&households, MealSlot::Dinner, &catalog);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].meal_id, "veggie-chili");
    assert_eq!(ranked[0].count, 2);
    assert_eq!(ranked[0].homes, vec!["555-0101", "555-0102"]);
}
