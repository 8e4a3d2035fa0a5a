/// Per-view aggregation and chart shaping.
///
/// Each view is a pure function of a [`FilteredView`] and the view's
/// dropdown selection; the result is a [`Panel`] ready for the widget.

pub mod categorical;
pub mod correlation;
pub mod geo;
pub mod kpi;
pub mod trend;

use serde_json::{json, Value};

use crate::chart::ChartConfig;
use crate::color::GenderColors;
use crate::data::filter::FilteredView;

use self::categorical::Habit;
use self::correlation::HealthMetric;
use self::geo::BoundaryNames;
use self::kpi::KpiCard;

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    Kpi,
    Correlation,
    Map,
    Categorical,
    Trend,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Kpi,
        View::Correlation,
        View::Map,
        View::Categorical,
        View::Trend,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            View::Kpi => "kpi",
            View::Correlation => "correlation",
            View::Map => "map",
            View::Categorical => "categorical",
            View::Trend => "trend",
        }
    }
}

/// Dropdown selections and shared styling for rendering.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub metric: HealthMetric,
    pub habit: Habit,
    pub colors: GenderColors,
    /// Region names of the boundary file, when one was supplied.
    pub boundary: Option<BoundaryNames>,
}

/// Rendered content of one tab.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Kpi(Vec<KpiCard>),
    Charts(Vec<ChartConfig>),
}

impl Panel {
    /// JSON handed to the page: metric cards, or ECharts options.
    pub fn to_json(&self) -> Value {
        match self {
            Panel::Kpi(cards) => json!({ "cards": cards }),
            Panel::Charts(charts) => {
                let options: Vec<Value> = charts.iter().map(ChartConfig::to_echarts).collect();
                json!({ "charts": options })
            }
        }
    }
}

pub fn render(view: View, filtered: &FilteredView<'_>, options: &ViewOptions) -> Panel {
    match view {
        View::Kpi => Panel::Kpi(kpi::summarize(filtered).cards()),
        View::Correlation => Panel::Charts(vec![ChartConfig::Scatter(correlation::scatter(
            filtered,
            options.metric,
            &options.colors,
        ))]),
        View::Map => {
            let summary = geo::country_means(filtered);
            Panel::Charts(vec![ChartConfig::Choropleth(geo::choropleth(
                &summary,
                options.boundary.as_ref(),
            ))])
        }
        View::Categorical => {
            let means = categorical::occupation_means(filtered);
            let groups = categorical::habit_groups(filtered, options.habit);
            Panel::Charts(vec![
                ChartConfig::Bar(categorical::occupation_bars(&means, &options.colors)),
                ChartConfig::Boxplot(categorical::habit_boxplot(&groups, &options.colors)),
            ])
        }
        View::Trend => Panel::Charts(vec![ChartConfig::Line(trend::trend_lines(
            &trend::age_trend(filtered),
        ))]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterCriteria;
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, Gender};

    #[test]
    fn every_view_renders() {
        let ds = Dataset::from_records(vec![
            record("USA", Gender::Male, 25, 3.0),
            record("UK", Gender::Female, 45, 5.0),
        ]);
        let filtered = FilteredView::apply(&ds, &FilterCriteria::all(&ds)).unwrap();
        let options = ViewOptions::default();

        for view in View::ALL {
            let json = render(view, &filtered, &options).to_json();
            assert!(json.is_object(), "{}", view.name());
        }

        let categorical = render(View::Categorical, &filtered, &options);
        match categorical {
            Panel::Charts(charts) => assert_eq!(charts.len(), 2),
            Panel::Kpi(_) => panic!("categorical view rendered cards"),
        }
    }

    #[test]
    fn kpi_panel_serializes_cards() {
        let ds = Dataset::from_records(vec![record("USA", Gender::Male, 25, 3.0)]);
        let filtered = FilteredView::apply(&ds, &FilterCriteria::all(&ds)).unwrap();
        let json = render(View::Kpi, &filtered, &ViewOptions::default()).to_json();
        assert_eq!(json["cards"][0]["value"], json!(3.0));
        assert_eq!(json["cards"][0]["unit"], "cups/day");
    }

    #[test]
    fn map_panel_uses_boundary_names() {
        let ds = Dataset::from_records(vec![record("USA", Gender::Male, 25, 3.0)]);
        let filtered = FilteredView::apply(&ds, &FilterCriteria::all(&ds)).unwrap();
        let json = render(View::Map, &filtered, &ViewOptions::default()).to_json();
        assert_eq!(json["charts"][0]["series"][0]["data"][0]["name"], "United States");
        assert_eq!(json["charts"][0]["series"][0]["data"][0]["value"], json!(3.0));
    }
}
