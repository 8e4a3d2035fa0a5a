use std::collections::BTreeMap;
use std::fmt;

use crate::chart::{Bar, BarChart, BoxplotChart, BoxplotGroup};
use crate::color::GenderColors;
use crate::data::aggregate::{round2, Mean};
use crate::data::filter::FilteredView;
use crate::data::model::{Gender, Record};

const INTAKE_AXIS: &str = "Coffee intake (cups/day)";

/// Lifestyle variable used to split the boxplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Habit {
    #[default]
    Smoking,
    AlcoholConsumption,
    PhysicalActivityHours,
}

/// Weekly activity hours bucketed as `[0,2) [2,4) [4,6) [6,∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActivityBin {
    UpToTwo,
    TwoToFour,
    FourToSix,
    SixPlus,
}

impl ActivityBin {
    pub fn from_hours(hours: f64) -> Self {
        if hours < 2.0 {
            ActivityBin::UpToTwo
        } else if hours < 4.0 {
            ActivityBin::TwoToFour
        } else if hours < 6.0 {
            ActivityBin::FourToSix
        } else {
            ActivityBin::SixPlus
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityBin::UpToTwo => "0-2h",
            ActivityBin::TwoToFour => "2-4h",
            ActivityBin::FourToSix => "4-6h",
            ActivityBin::SixPlus => "6h+",
        }
    }
}

/// Grouping key for one habit. Bins sort in bin order, categories by text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum HabitKey {
    Bin(ActivityBin),
    Category(String),
}

impl HabitKey {
    pub fn of(habit: Habit, record: &Record) -> Self {
        match habit {
            Habit::Smoking => HabitKey::Category(record.smoking.clone()),
            Habit::AlcoholConsumption => HabitKey::Category(record.alcohol_consumption.clone()),
            Habit::PhysicalActivityHours => {
                HabitKey::Bin(ActivityBin::from_hours(record.physical_activity_hours))
            }
        }
    }
}

impl fmt::Display for HabitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HabitKey::Bin(bin) => f.write_str(bin.label()),
            HabitKey::Category(value) => f.write_str(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Occupation × gender means
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct OccupationMean {
    pub occupation: String,
    pub gender: Gender,
    pub mean: f64,
}

pub fn occupation_means(view: &FilteredView<'_>) -> Vec<OccupationMean> {
    let mut groups: BTreeMap<(&str, Gender), Mean> = BTreeMap::new();
    for rec in view.records() {
        groups
            .entry((rec.occupation.as_str(), rec.gender))
            .or_default()
            .push(rec.coffee_intake);
    }
    groups
        .into_iter()
        .filter_map(|((occupation, gender), mean)| {
            Some(OccupationMean {
                occupation: occupation.to_string(),
                gender,
                mean: round2(mean.value()?),
            })
        })
        .collect()
}

pub fn occupation_bars(means: &[OccupationMean], colors: &GenderColors) -> BarChart {
    BarChart {
        y_name: format!("Mean {}", INTAKE_AXIS.to_lowercase()),
        bars: means
            .iter()
            .map(|m| Bar {
                label: format!("{} ({})", m.occupation, m.gender),
                value: m.mean,
                color: Some(colors.hex_for(m.gender)),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Habit × gender distributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HabitGroup {
    pub key: HabitKey,
    pub gender: Gender,
    /// Coffee intake of every record in the group, in dataset order.
    pub values: Vec<f64>,
}

pub fn habit_groups(view: &FilteredView<'_>, habit: Habit) -> Vec<HabitGroup> {
    let mut groups: BTreeMap<(HabitKey, Gender), Vec<f64>> = BTreeMap::new();
    for rec in view.records() {
        groups
            .entry((HabitKey::of(habit, rec), rec.gender))
            .or_default()
            .push(rec.coffee_intake);
    }
    groups
        .into_iter()
        .map(|((key, gender), values)| HabitGroup { key, gender, values })
        .collect()
}

pub fn habit_boxplot(groups: &[HabitGroup], colors: &GenderColors) -> BoxplotChart {
    BoxplotChart {
        y_name: INTAKE_AXIS.to_string(),
        groups: groups
            .iter()
            .map(|g| BoxplotGroup {
                label: format!("{} ({})", g.key, g.gender),
                values: g.values.clone(),
                color: Some(colors.hex_for(g.gender)),
            })
            .collect(),
    }
}
