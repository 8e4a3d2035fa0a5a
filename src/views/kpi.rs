use serde::Serialize;

use crate::data::aggregate::{round2, Mean};
use crate::data::filter::FilteredView;

/// Headline means over the filtered records, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSummary {
    pub coffee_intake: f64,
    pub sleep_hours: f64,
    pub stress_index: f64,
    pub bmi: f64,
}

/// One metric card as shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: f64,
    pub unit: Option<&'static str>,
}

pub fn summarize(view: &FilteredView<'_>) -> KpiSummary {
    let (mut coffee, mut sleep, mut stress, mut bmi) =
        (Mean::default(), Mean::default(), Mean::default(), Mean::default());
    for rec in view.records() {
        coffee.push(rec.coffee_intake);
        sleep.push(rec.sleep_hours);
        stress.push(rec.stress_index());
        bmi.push(rec.bmi);
    }
    // A FilteredView is never empty, so every mean has a value.
    let mean = |m: Mean| round2(m.value().unwrap_or_default());
    KpiSummary {
        coffee_intake: mean(coffee),
        sleep_hours: mean(sleep),
        stress_index: mean(stress),
        bmi: mean(bmi),
    }
}

impl KpiSummary {
    pub fn cards(&self) -> Vec<KpiCard> {
        vec![
            KpiCard {
                label: "Mean coffee intake",
                value: self.coffee_intake,
                unit: Some("cups/day"),
            },
            KpiCard {
                label: "Mean sleep",
                value: self.sleep_hours,
                unit: Some("hours/day"),
            },
            KpiCard {
                label: "Mean stress index",
                value: self.stress_index,
                unit: None,
            },
            KpiCard {
                label: "Mean BMI",
                value: self.bmi,
                unit: None,
            },
        ]
    }
}
