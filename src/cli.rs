use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::models::MealSlot;
use crate::planner::LeftoverPolicy;

/// meal_cycle: leftover-aware 28-day meal schedules for subscription households.
#[derive(Parser, Debug)]
#[command(name = "meal_cycle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal catalog JSON file.
    #[arg(short, long, default_value = "meals.json", global = true)]
    pub catalog: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactively plan one cycle for a single household.
    Plan {
        /// Leftover handling between cook days.
        #[arg(long, value_enum, default_value_t = LeftoverPolicy::DrainFirst)]
        policy: LeftoverPolicy,
    },

    /// Generate cycles for every household in a roster.
    Generate {
        /// Households CSV file.
        #[arg(long)]
        households: PathBuf,

        /// Per-household serving-size overrides (JSON).
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Only generate this meal slot.
        #[arg(long, value_enum)]
        slot: Option<MealSlot>,

        /// Only show this household.
        #[arg(long)]
        home: Option<String>,

        /// Leftover handling between cook days.
        #[arg(long, value_enum, default_value_t = LeftoverPolicy::DrainFirst)]
        policy: LeftoverPolicy,

        /// Order each household's preferences by roster-wide popularity.
        #[arg(long)]
        rank_by_popularity: bool,

        /// Write the generated menus to this JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print only per-slot summaries instead of full day tables.
        #[arg(long)]
        summary_only: bool,
    },

    /// Rank meals by how many households list them.
    Popularity {
        /// Households CSV file.
        #[arg(long)]
        households: PathBuf,

        /// Meal slot to rank.
        #[arg(long, value_enum)]
        slot: MealSlot,

        /// Restrict the ranking to meals this household lists.
        #[arg(long)]
        home: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            policy: LeftoverPolicy::default(),
        }
    }
}

impl Cli {
    /// Log filter directive implied by `-v` flags.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
