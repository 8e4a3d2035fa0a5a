use crate::chart::{ScatterChart, ScatterPoint};
use crate::color::GenderColors;
use crate::data::filter::FilteredView;
use crate::data::model::Record;

/// Health metric plotted against coffee intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HealthMetric {
    #[default]
    SleepHours,
    StressIndex,
    HeartRate,
    Bmi,
}

impl HealthMetric {
    /// Column name, used as the axis title.
    pub fn column(&self) -> &'static str {
        match self {
            HealthMetric::SleepHours => "Sleep_Hours",
            HealthMetric::StressIndex => "Stress_Index",
            HealthMetric::HeartRate => "Heart_Rate",
            HealthMetric::Bmi => "BMI",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthMetric::SleepHours => "Sleep hours",
            HealthMetric::StressIndex => "Stress index",
            HealthMetric::HeartRate => "Heart rate",
            HealthMetric::Bmi => "BMI",
        }
    }

    pub fn value(&self, record: &Record) -> f64 {
        match self {
            HealthMetric::SleepHours => record.sleep_hours,
            HealthMetric::StressIndex => record.stress_index(),
            HealthMetric::HeartRate => record.heart_rate,
            HealthMetric::Bmi => record.bmi,
        }
    }
}

/// Marker size grows with age, with a floor so young respondents stay visible.
pub fn symbol_size(age: u32) -> f64 {
    (f64::from(age) / 5.0).max(5.0)
}

/// One point per record: `(coffee intake, metric)`, coloured by gender.
pub fn scatter(view: &FilteredView<'_>, metric: HealthMetric, colors: &GenderColors) -> ScatterChart {
    let points = view
        .records()
        .map(|rec| ScatterPoint {
            value: [rec.coffee_intake, metric.value(rec)],
            name: format!("{} / {}", rec.country, rec.occupation),
            symbol_size: symbol_size(rec.age),
            color: colors.hex_for(rec.gender),
        })
        .collect();

    ScatterChart {
        x_name: "Coffee intake (cups/day)".to_string(),
        y_name: metric.column().to_string(),
        y_label: metric.label().to_string(),
        points,
    }
}
