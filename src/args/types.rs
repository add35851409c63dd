use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::backend::BackendConfig;
use crate::model::{DayPlan, HandicapLevel};
use crate::mvu::round::MAX_FETCH_ATTEMPTS;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Hosted PostgREST tables and edge functions
    Rest,
    /// Local sqlite mirror of the hosted tables
    Sqlite,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Backend type: rest or sqlite
    #[arg(short = 'b', long, value_enum, default_value_t = BackendKind::Sqlite)]
    pub backend: BackendKind,
    // Only necessary for rest.
    #[arg(long, value_name = "API_URL", env = "SUPABASE_URL")]
    pub api_url: Option<String>,
    /// Api key, or the path of a secrets file holding it.
    #[arg(long, value_name = "API_KEY", env = "SUPABASE_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// For sqlite, the database filename. `:memory:` keeps everything in memory.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME", default_value = ":memory:")]
    pub db_name: String,
    /// If specified, this sql is run on program startup, after the schema is created.
    #[arg(long, value_name = "DATABASE_STARTUP_SCRIPT", value_parser = crate::args::validation::check_readable_file)]
    pub db_startup_script: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Load a round's score card and course context
    Round {
        round_id: String,
        /// How many fetches to try before giving up
        #[arg(long, default_value_t = MAX_FETCH_ATTEMPTS)]
        attempts: u32,
    },
    /// Build a practice plan for a golf problem
    Analyze {
        #[arg(required = true, num_args = 1..)]
        issue: Vec<String>,
    },
    /// Show or toggle drill completion for a practice plan day
    Progress {
        /// Json file backing the completion flags
        #[arg(long, value_name = "STORE_FILE")]
        store: PathBuf,
        #[arg(long)]
        plan_id: String,
        #[arg(long, value_name = "DAY_PLAN_JSON", value_parser = crate::args::validation::check_readable_day_plan)]
        day_plan: DayPlan,
        #[arg(long, default_value_t = 1)]
        day: u32,
        /// Drill title to flip before reporting
        #[arg(long)]
        toggle: Option<String>,
    },
    /// Show a user's onboarding profile, or save new answers with --save
    Profile {
        user_id: String,
        #[arg(long)]
        save: bool,
        #[arg(long, value_parser = crate::args::validation::check_handicap_level)]
        handicap: Option<HandicapLevel>,
        /// Goal id to select, e.g. lower-score or handicap. Repeatable.
        #[arg(long = "goal", value_name = "GOAL_ID")]
        goals: Vec<String>,
        #[arg(long)]
        score_goal: Option<u32>,
        #[arg(long)]
        handicap_goal: Option<f32>,
        /// Free-text goals or notes
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub backend: BackendConfig,
    pub command: Command,
}
