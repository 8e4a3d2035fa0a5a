use std::path::PathBuf;

use clap::Parser;

use coffee_dash::data::model::Gender;
use coffee_dash::views::categorical::Habit;
use coffee_dash::views::correlation::HealthMetric;
use coffee_dash::views::View;

#[derive(Parser, Debug)]
#[command(name = "coffee-dash")]
#[command(about = "Filter the coffee & health survey and emit dashboard chart options as JSON")]
#[command(version)]
pub struct Args {
    /// Dataset file (.csv, .json or .parquet).
    #[arg(long, env = "COFFEE_DASH_DATA")]
    pub data: PathBuf,

    /// Seconds a loaded dataset is reused before being read again.
    #[arg(long, env = "COFFEE_DASH_CACHE_TTL", default_value_t = 600)]
    pub cache_ttl: u64,

    /// Country to include (repeatable). Defaults to every country.
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Gender to include (repeatable). Defaults to both.
    #[arg(long = "gender", value_name = "GENDER", value_parser = parse_gender)]
    pub genders: Vec<Gender>,

    /// Youngest age shown (inclusive).
    #[arg(long)]
    pub age_min: Option<u32>,

    /// Oldest age shown (inclusive).
    #[arg(long)]
    pub age_max: Option<u32>,

    /// Health metric for the correlation view.
    #[arg(long, value_enum, default_value_t = HealthMetric::SleepHours)]
    pub metric: HealthMetric,

    /// Lifestyle variable for the boxplot.
    #[arg(long, value_enum, default_value_t = Habit::Smoking)]
    pub habit: Habit,

    /// View to render (repeatable). Defaults to every view.
    #[arg(long = "view", value_enum)]
    pub views: Vec<View>,

    /// Boundary GeoJSON used to check the choropleth region names.
    #[arg(long, env = "COFFEE_DASH_BOUNDARY")]
    pub boundary: Option<PathBuf>,

    /// Write one `<view>.json` per view into this directory instead of stdout.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Print the available filter values and exit.
    #[arg(long)]
    pub list_options: bool,

    #[arg(long, value_enum, help = "Set the logging level (RUST_LOG takes precedence)")]
    pub log_level: Option<LogLevel>,
}

/// Case-insensitive gender flag (`--gender female`).
fn parse_gender(value: &str) -> Result<Gender, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        _ => Err(format!("expected 'male' or 'female', got '{value}'")),
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
