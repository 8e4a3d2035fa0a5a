mod cli;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::{json, Map, Value};

use coffee_dash::data::cache::DatasetCache;
use coffee_dash::data::filter::DEFAULT_AGE_RANGE;
use coffee_dash::data::model::{Dataset, Gender};
use coffee_dash::error::DashboardError;
use coffee_dash::state::{DashboardState, EMPTY_RESULT_MESSAGE};
use coffee_dash::views::geo::BoundaryNames;
use coffee_dash::views::{Panel, View};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = args.log_level.map(|l| l.as_str()).unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cache = DatasetCache::new(&args.data, Duration::from_secs(args.cache_ttl));
    let dataset = cache
        .get()
        .with_context(|| format!("loading dataset {}", cache.path().display()))?;

    if args.list_options {
        return print_json(&FilterOptions::of(&dataset), args.pretty);
    }

    let state = build_state(&args, dataset)?;
    let rendered = match render(&state, &args.views) {
        Ok(rendered) => rendered,
        Err(DashboardError::EmptyResult) => {
            let message = state
                .status_message
                .as_deref()
                .unwrap_or(EMPTY_RESULT_MESSAGE);
            eprintln!("warning: {message}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match &args.out_dir {
        Some(dir) => write_views(dir, &rendered, args.pretty),
        None => {
            let views: Map<String, Value> = rendered
                .iter()
                .map(|(view, panel)| (view.name().to_string(), panel.to_json()))
                .collect();
            let document = json!({
                "records": state.visible_indices.len(),
                "views": views,
            });
            print_json(&document, args.pretty)
        }
    }
}

/// Apply the command-line selections on top of the default filters.
fn build_state(args: &Args, dataset: Arc<Dataset>) -> Result<DashboardState> {
    let mut state = DashboardState::default();
    state.set_dataset(Arc::clone(&dataset));

    if !args.countries.is_empty() {
        for country in args.countries.iter().filter(|c| !dataset.countries.contains(*c)) {
            log::warn!("Country '{country}' does not occur in the dataset");
        }
        state.select_countries(args.countries.iter().cloned());
    }
    if !args.genders.is_empty() {
        state.select_genders(args.genders.iter().copied());
    }
    if args.age_min.is_some() || args.age_max.is_some() {
        let current = state
            .criteria
            .as_ref()
            .map(|c| (c.age.min(), c.age.max()))
            .unwrap_or(DEFAULT_AGE_RANGE);
        let min = args.age_min.unwrap_or(current.0);
        let max = args.age_max.unwrap_or(current.1);
        state.set_age_range(min, max)?;
    }

    state.set_metric(args.metric);
    state.set_habit(args.habit);
    if let Some(path) = &args.boundary {
        state.options.boundary = Some(BoundaryNames::load(path)?);
    }
    Ok(state)
}

fn render(state: &DashboardState, views: &[View]) -> Result<Vec<(View, Panel)>, DashboardError> {
    if views.is_empty() {
        return state.render_all();
    }
    views
        .iter()
        .map(|&view| state.render(view).map(|panel| (view, panel)))
        .collect()
}

fn write_views(dir: &Path, rendered: &[(View, Panel)], pretty: bool) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for (view, panel) in rendered {
        let path = dir.join(format!("{}.json", view.name()));
        let text = to_json_string(&panel.to_json(), pretty)?;
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", to_json_string(value, pretty)?);
    Ok(())
}

fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("serializing JSON output")
}

/// Values offered by the sidebar controls.
#[derive(Debug, Serialize)]
struct FilterOptions<'a> {
    countries: &'a BTreeSet<String>,
    genders: &'a BTreeSet<Gender>,
    age_min: Option<u32>,
    age_max: Option<u32>,
}

impl<'a> FilterOptions<'a> {
    fn of(dataset: &'a Dataset) -> Self {
        FilterOptions {
            countries: &dataset.countries,
            genders: &dataset.genders,
            age_min: dataset.age_bounds.map(|(lo, _)| lo),
            age_max: dataset.age_bounds.map(|(_, hi)| hi),
        }
    }
}
