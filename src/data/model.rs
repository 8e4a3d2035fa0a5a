use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Categorical enums
// ---------------------------------------------------------------------------

/// Gender as recorded in the survey. Only these two values are kept.
///
/// Variant order matches the alphabetical order of the labels so grouped
/// output sorts the same way the labels would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            _ => Err(RecordError::UnsupportedGender(s.to_string())),
        }
    }
}

/// Self-reported stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    /// Ordinal encoding used for averaging (Low=1, Medium=2, High=3).
    pub fn index(&self) -> u8 {
        match self {
            StressLevel::Low => 1,
            StressLevel::Medium => 2,
            StressLevel::High => 3,
        }
    }
}

impl FromStr for StressLevel {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(StressLevel::Low),
            "Medium" => Ok(StressLevel::Medium),
            "High" => Ok(StressLevel::High),
            other => Err(RecordError::UnknownStressLevel(other.to_string())),
        }
    }
}

/// Validation failures while turning a raw row into a [`Record`].
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("unsupported gender '{0}'")]
    UnsupportedGender(String),
    #[error("unknown stress level '{0}' (expected Low, Medium or High)")]
    UnknownStressLevel(String),
    #[error("field '{field}' is not a finite number: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// One person's measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub country: String,
    pub gender: Gender,
    pub age: u32,
    pub occupation: String,
    /// Cups per day.
    pub coffee_intake: f64,
    pub sleep_hours: f64,
    pub stress_level: StressLevel,
    pub heart_rate: f64,
    pub bmi: f64,
    pub smoking: String,
    pub alcohol_consumption: String,
    pub physical_activity_hours: f64,
}

impl Record {
    pub fn stress_index(&self) -> f64 {
        f64::from(self.stress_level.index())
    }
}

/// A categorical cell that may be written as text or as a number
/// (`Smoking` is `0`/`1` in the published CSV).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoricalCell {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for CategoricalCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoricalCell::Int(i) => write!(f, "{i}"),
            CategoricalCell::Float(v) => write!(f, "{v}"),
            CategoricalCell::Bool(b) => write!(f, "{b}"),
            CategoricalCell::Text(s) => f.write_str(s),
        }
    }
}

/// Row as it appears in the source file, before validation.
/// Column names follow the published dataset; unknown columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Coffee_Intake")]
    pub coffee_intake: f64,
    #[serde(rename = "Sleep_Hours")]
    pub sleep_hours: f64,
    #[serde(rename = "Stress_Level")]
    pub stress_level: String,
    #[serde(rename = "Heart_Rate")]
    pub heart_rate: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "Smoking")]
    pub smoking: CategoricalCell,
    #[serde(rename = "Alcohol_Consumption")]
    pub alcohol_consumption: CategoricalCell,
    #[serde(rename = "Physical_Activity_Hours")]
    pub physical_activity_hours: f64,
}

impl RawRecord {
    /// Validate into a [`Record`].
    ///
    /// Rows whose gender is neither Male nor Female yield `Ok(None)`: they
    /// are outside the dataset's scope rather than malformed.
    pub fn into_record(self) -> Result<Option<Record>, RecordError> {
        let gender = match self.gender.parse::<Gender>() {
            Ok(g) => g,
            Err(_) => return Ok(None),
        };
        let stress_level = self.stress_level.parse::<StressLevel>()?;

        for (field, value) in [
            ("Coffee_Intake", self.coffee_intake),
            ("Sleep_Hours", self.sleep_hours),
            ("Heart_Rate", self.heart_rate),
            ("BMI", self.bmi),
            ("Physical_Activity_Hours", self.physical_activity_hours),
        ] {
            if !value.is_finite() {
                return Err(RecordError::NonFinite { field, value });
            }
        }

        Ok(Some(Record {
            country: self.country.trim().to_string(),
            gender,
            age: self.age,
            occupation: self.occupation.trim().to_string(),
            coffee_intake: self.coffee_intake,
            sleep_hours: self.sleep_hours,
            stress_level,
            heart_rate: self.heart_rate,
            bmi: self.bmi,
            smoking: self.smoking.to_string(),
            alcohol_consumption: self.alcohol_consumption.to_string(),
            physical_activity_hours: self.physical_activity_hours,
        }))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full validated dataset with pre-computed filter options.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Sorted distinct countries.
    pub countries: BTreeSet<String>,
    /// Distinct genders present.
    pub genders: BTreeSet<Gender>,
    /// Observed (min, max) age, `None` for an empty dataset.
    pub age_bounds: Option<(u32, u32)>,
}

impl Dataset {
    /// Build the filter option indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut countries = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut age_bounds: Option<(u32, u32)> = None;

        for rec in &records {
            countries.insert(rec.country.clone());
            genders.insert(rec.gender);
            age_bounds = Some(match age_bounds {
                None => (rec.age, rec.age),
                Some((lo, hi)) => (lo.min(rec.age), hi.max(rec.age)),
            });
        }

        Dataset {
            records,
            countries,
            genders,
            age_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Compact record builder for fixtures across the crate.
    pub(crate) fn record(country: &str, gender: Gender, age: u32, coffee: f64) -> Record {
        Record {
            country: country.to_string(),
            gender,
            age,
            occupation: "Office".to_string(),
            coffee_intake: coffee,
            sleep_hours: 7.0,
            stress_level: StressLevel::Low,
            heart_rate: 70.0,
            bmi: 24.0,
            smoking: "0".to_string(),
            alcohol_consumption: "0".to_string(),
            physical_activity_hours: 3.0,
        }
    }

    fn raw(gender: &str, stress: &str) -> RawRecord {
        RawRecord {
            country: " Germany ".to_string(),
            gender: gender.to_string(),
            age: 33,
            occupation: "Doctor".to_string(),
            coffee_intake: 2.5,
            sleep_hours: 6.5,
            stress_level: stress.to_string(),
            heart_rate: 71.0,
            bmi: 22.1,
            smoking: CategoricalCell::Int(1),
            alcohol_consumption: CategoricalCell::Text("Yes".to_string()),
            physical_activity_hours: 4.2,
        }
    }

    #[test]
    fn stress_index_is_ordinal() {
        assert_eq!(StressLevel::Low.index(), 1);
        assert_eq!(StressLevel::Medium.index(), 2);
        assert_eq!(StressLevel::High.index(), 3);
    }

    #[test]
    fn raw_record_validates_into_record() {
        let rec = raw("Female", "Medium").into_record().unwrap().unwrap();
        assert_eq!(rec.country, "Germany");
        assert_eq!(rec.gender, Gender::Female);
        assert_eq!(rec.stress_level, StressLevel::Medium);
        assert_eq!(rec.smoking, "1");
        assert_eq!(rec.alcohol_consumption, "Yes");
        assert_eq!(rec.stress_index(), 2.0);
    }

    #[test]
    fn other_genders_are_skipped() {
        assert_eq!(raw("Other", "Low").into_record(), Ok(None));
    }

    #[test]
    fn gender_labels_must_match_exactly() {
        assert_eq!(raw("male", "Low").into_record(), Ok(None));
        assert_eq!(raw("FEMALE", "Low").into_record(), Ok(None));
        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
    }

    #[test]
    fn unknown_stress_level_is_rejected() {
        assert_eq!(
            raw("Male", "Extreme").into_record(),
            Err(RecordError::UnknownStressLevel("Extreme".to_string()))
        );
    }

    #[test]
    fn non_finite_measurements_are_rejected() {
        let mut r = raw("Male", "High");
        r.bmi = f64::NAN;
        assert!(matches!(
            r.into_record(),
            Err(RecordError::NonFinite { field: "BMI", .. })
        ));
    }

    #[test]
    fn dataset_indexes_filter_options() {
        let ds = Dataset::from_records(vec![
            record("USA", Gender::Male, 25, 3.0),
            record("UK", Gender::Female, 70, 1.0),
            record("USA", Gender::Female, 18, 2.0),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.countries.iter().cloned().collect::<Vec<_>>(),
            vec!["UK".to_string(), "USA".to_string()]
        );
        assert_eq!(ds.genders.len(), 2);
        assert_eq!(ds.age_bounds, Some((18, 70)));
    }

    #[test]
    fn empty_dataset_has_no_age_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.age_bounds, None);
    }
}
