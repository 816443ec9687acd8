use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meal_cycle_rs::cli::{Cli, Command};
use meal_cycle_rs::error::Result;
use meal_cycle_rs::interface::{
    collect_plan_request, display_household_menu, display_popularity, display_schedule,
    display_summary, prompt_yes_no,
};
use meal_cycle_rs::models::{CycleSummary, HouseholdMenu, MealSlot};
use meal_cycle_rs::planner::{
    generate_cycle_with, generate_household_menus, home_popularity, meal_popularity, CycleConfig,
    LeftoverPolicy, RosterOptions,
};
use meal_cycle_rs::state::{
    load_catalog, load_households, load_serving_overrides, save_menus, MealCatalog,
    ServingOverrides,
};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let catalog_path = cli.catalog;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan { policy } => cmd_plan(&catalog_path, policy),
        Command::Generate {
            households,
            overrides,
            slot,
            home,
            policy,
            rank_by_popularity,
            output,
            summary_only,
        } => cmd_generate(
            &catalog_path,
            &households,
            overrides.as_deref(),
            RosterOptions {
                cycle: CycleConfig::with_policy(policy),
                slot,
                rank_by_popularity,
            },
            home.as_deref(),
            output,
            summary_only,
        ),
        Command::Popularity {
            households,
            slot,
            home,
        } => cmd_popularity(&catalog_path, &households, slot, home.as_deref()),
    }
}

fn open_catalog(path: &Path) -> Result<Option<MealCatalog>> {
    if !path.exists() {
        eprintln!("Meal catalog not found: {}", path.display());
        eprintln!("Pass --catalog or place meals.json in the current directory.");
        return Ok(None);
    }

    let catalog = load_catalog(path)?;
    if catalog.is_empty() {
        println!("The meal catalog is empty. Upload meals before planning.");
        return Ok(None);
    }

    Ok(Some(catalog))
}

/// Plan one cycle interactively.
fn cmd_plan(catalog_path: &Path, policy: LeftoverPolicy) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        return Ok(());
    };

    println!("Loaded {} meals", catalog.len());
    println!();

    let request = collect_plan_request(&catalog)?;

    println!();
    println!(
        "Planning {} for {} resident(s) across {} preference(s)...",
        request.slot,
        request.residents,
        request.preferences.len()
    );

    let days = generate_cycle_with(
        &CycleConfig::with_policy(policy).for_slot(request.slot),
        &request.preferences,
        &request.serving_sizes,
        request.residents,
        &catalog,
    )?;

    display_schedule(request.slot, &days);
    display_summary(&CycleSummary::from_days(&days, request.residents));

    if prompt_yes_no("Save this schedule as JSON?", false)? {
        let mut menu = HouseholdMenu::new("interactive", request.residents);
        menu.schedules.insert(request.slot, days);
        let path = PathBuf::from(format!("schedule_{}.json", request.slot));
        save_menus(&path, &[menu])?;
        println!("Schedule saved to {}.", path.display());
    }

    Ok(())
}

/// Generate schedules for a whole roster.
fn cmd_generate(
    catalog_path: &Path,
    households_path: &Path,
    overrides_path: Option<&Path>,
    options: RosterOptions,
    home: Option<&str>,
    output: Option<PathBuf>,
    summary_only: bool,
) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        return Ok(());
    };

    let households = load_households(households_path)?;
    let overrides = match overrides_path {
        Some(path) => load_serving_overrides(path)?,
        None => ServingOverrides::new(),
    };

    // Popularity ranking needs the whole roster, so filter after generation.
    let mut menus = generate_household_menus(&households, &catalog, &overrides, &options);
    if let Some(home_id) = home {
        menus.retain(|m| m.home_id == home_id);
        if menus.is_empty() {
            println!("No household with id '{}'.", home_id);
            return Ok(());
        }
    }

    for menu in &menus {
        display_household_menu(menu, summary_only);
    }

    let failed = menus.iter().filter(|m| !m.is_complete()).count();
    println!(
        "Generated menus for {} household(s), {} with failed slots.",
        menus.len(),
        failed
    );

    if let Some(path) = output {
        save_menus(&path, &menus)?;
        info!(path = %path.display(), "Wrote menus");
        println!("Menus written to {}.", path.display());
    }

    Ok(())
}

/// Show meal popularity for one slot.
fn cmd_popularity(
    catalog_path: &Path,
    households_path: &Path,
    slot: MealSlot,
    home: Option<&str>,
) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        return Ok(());
    };

    let households = load_households(households_path)?;

    match home {
        Some(home_id) => {
            let entries = home_popularity(home_id, &households, slot, &catalog);
            display_popularity(&entries, &format!("{} popularity for home {}", slot, home_id));
        }
        None => {
            let entries = meal_popularity(&households, slot, &catalog);
            display_popularity(&entries, &format!("{} popularity", slot));
        }
    }

    Ok(())
}
