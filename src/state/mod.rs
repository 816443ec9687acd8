mod catalog;
mod persistence;

pub use catalog::MealCatalog;
pub use persistence::{
    load_catalog, load_households, load_serving_overrides, parse_households, save_catalog,
    save_menus, ServingOverrides,
};
