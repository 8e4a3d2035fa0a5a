use std::collections::BTreeMap;

use crate::chart::{LineChart, LineSeries};
use crate::data::aggregate::{round2, Mean};
use crate::data::filter::FilteredView;

/// Per-age means as parallel series, ascending by age.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeTrend {
    pub ages: Vec<u32>,
    pub coffee_intake: Vec<f64>,
    pub sleep_hours: Vec<f64>,
}

pub fn age_trend(view: &FilteredView<'_>) -> AgeTrend {
    let mut by_age: BTreeMap<u32, (Mean, Mean)> = BTreeMap::new();
    for rec in view.records() {
        let (coffee, sleep) = by_age.entry(rec.age).or_default();
        coffee.push(rec.coffee_intake);
        sleep.push(rec.sleep_hours);
    }

    let mut trend = AgeTrend {
        ages: Vec::with_capacity(by_age.len()),
        coffee_intake: Vec::with_capacity(by_age.len()),
        sleep_hours: Vec::with_capacity(by_age.len()),
    };
    for (age, (coffee, sleep)) in by_age {
        if let (Some(c), Some(s)) = (coffee.value(), sleep.value()) {
            trend.ages.push(age);
            trend.coffee_intake.push(round2(c));
            trend.sleep_hours.push(round2(s));
        }
    }
    trend
}

pub fn trend_lines(trend: &AgeTrend) -> LineChart {
    LineChart {
        categories: trend.ages.iter().map(u32::to_string).collect(),
        series: vec![
            LineSeries {
                name: "Coffee_Intake".to_string(),
                data: trend.coffee_intake.clone(),
            },
            LineSeries {
                name: "Sleep_Hours".to_string(),
                data: trend.sleep_hours.clone(),
            },
        ],
    }
}
