use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::chart::{ChoroplethChart, RegionValue};
use crate::color::{gradient, to_hex, MAP_HIGH, MAP_LOW};
use crate::data::aggregate::{round2, Mean};
use crate::data::filter::FilteredView;

/// Dataset country names that differ from the boundary file's names.
/// Names not listed are used unchanged.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("USA", "United States"),
    ("UK", "United Kingdom"),
    ("South Korea", "Korea, Rep."),
];

/// Name under which the widget registers the boundary GeoJSON.
pub const MAP_NAME: &str = "worldMap";

const GRADIENT_STOPS: usize = 5;

pub fn boundary_name(country: &str) -> &str {
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == country)
        .map(|(_, name)| *name)
        .unwrap_or(country)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CountryMean {
    /// Country as spelled in the dataset.
    pub country: String,
    /// Country as spelled in the boundary file.
    pub region: String,
    /// Mean coffee intake, rounded to two decimals.
    pub mean: f64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub countries: Vec<CountryMean>,
    /// Colour-scale bounds over the unrounded country means.
    pub min: f64,
    pub max: f64,
}

/// Mean coffee intake per country, ordered by dataset country name.
pub fn country_means(view: &FilteredView<'_>) -> CountrySummary {
    let mut groups: BTreeMap<&str, Mean> = BTreeMap::new();
    for rec in view.records() {
        groups
            .entry(rec.country.as_str())
            .or_default()
            .push(rec.coffee_intake);
    }

    let mut unrounded = Vec::with_capacity(groups.len());
    let countries = groups
        .into_iter()
        .filter_map(|(country, mean)| {
            let value = mean.value()?;
            unrounded.push(value);
            Some(CountryMean {
                country: country.to_string(),
                region: boundary_name(country).to_string(),
                mean: round2(value),
                records: mean.count(),
            })
        })
        .collect();

    let (min, max) = scale_bounds(unrounded);
    CountrySummary { countries, min, max }
}

/// Smallest and largest value, or `(0, 1)` when there are none.
pub fn scale_bounds(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .fold(None, |bounds, value| {
            Some(match bounds {
                None => (value, value),
                Some((lo, hi)) => (f64::min(lo, value), f64::max(hi, value)),
            })
        })
        .unwrap_or((0.0, 1.0))
}

// ---------------------------------------------------------------------------
// Boundary names
// ---------------------------------------------------------------------------

/// Region names present in the boundary GeoJSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryNames(BTreeSet<String>);

impl BoundaryNames {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading boundary file")?;
        let root: Value = serde_json::from_str(&text).context("parsing boundary GeoJSON")?;
        let names = Self::from_geojson(&root)?;
        log::info!("Loaded {} region names from {}", names.len(), path.display());
        Ok(names)
    }

    /// Collect `features[].properties.name` (or `NAME` / `ADMIN`).
    pub fn from_geojson(root: &Value) -> Result<Self> {
        let features = root
            .get("features")
            .and_then(Value::as_array)
            .context("GeoJSON has no 'features' array")?;

        let names = features
            .iter()
            .filter_map(|feature| {
                let props = feature.get("properties")?;
                ["name", "NAME", "ADMIN"]
                    .iter()
                    .find_map(|key| props.get(*key).and_then(Value::as_str))
                    .map(str::to_string)
            })
            .collect();
        Ok(BoundaryNames(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

// ---------------------------------------------------------------------------
// Chart shaping
// ---------------------------------------------------------------------------

/// Shape the country means into a choropleth. Names missing from
/// `boundary` are kept but logged.
pub fn choropleth(summary: &CountrySummary, boundary: Option<&BoundaryNames>) -> ChoroplethChart {
    if let Some(names) = boundary {
        for c in summary.countries.iter().filter(|c| !names.contains(&c.region)) {
            log::warn!(
                "Country '{}' has no region named '{}' in the boundary file",
                c.country,
                c.region
            );
        }
    }

    ChoroplethChart {
        series_name: "Mean coffee intake".to_string(),
        map_name: MAP_NAME.to_string(),
        regions: summary
            .countries
            .iter()
            .map(|c| RegionValue {
                name: c.region.clone(),
                value: c.mean,
            })
            .collect(),
        min: summary.min,
        max: summary.max,
        in_range: gradient(MAP_LOW, MAP_HIGH, GRADIENT_STOPS)
            .into_iter()
            .map(to_hex)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::filter::FilterCriteria;
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, Gender};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("USA", Gender::Male, 30, 3.0),
            record("USA", Gender::Female, 40, 2.0),
            record("UK", Gender::Male, 35, 1.0),
            record("South Korea", Gender::Female, 28, 4.333),
            record("Germany", Gender::Male, 50, 2.25),
        ])
    }

    #[test]
    fn aliases_are_remapped_and_others_pass_through() {
        assert_eq!(boundary_name("USA"), "United States");
        assert_eq!(boundary_name("UK"), "United Kingdom");
        assert_eq!(boundary_name("South Korea"), "Korea, Rep.");
        assert_eq!(boundary_name("Germany"), "Germany");
        assert_eq!(boundary_name("usa"), "usa");
    }

    #[test]
    fn one_entry_per_distinct_country() {
        let ds = dataset();
        let view = FilteredView::apply(&ds, &FilterCriteria::all(&ds)).unwrap();
        let summary = country_means(&view);

        assert_eq!(summary.countries.len(), ds.countries.len());
        let total: usize = summary.countries.iter().map(|c| c.records).sum();
        assert_eq!(total, view.len());

        let regions: Vec<(&str, f64)> = summary
            .countries
            .iter()
            .map(|c| (c.region.as_str(), c.mean))
            .collect();
        assert_eq!(
            regions,
            vec![
                ("Germany", 2.25),
                ("Korea, Rep.", 4.33),
                ("United Kingdom", 1.0),
                ("United States", 2.5),
            ]
        );
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.333);
    }

    #[test]
    fn scale_bounds_default_without_countries() {
        assert_eq!(scale_bounds(Vec::new()), (0.0, 1.0));
        assert_eq!(scale_bounds([2.5]), (2.5, 2.5));
        assert_eq!(scale_bounds([3.0, 1.25, 2.0]), (1.25, 3.0));
    }

    #[test]
    fn choropleth_carries_bounds_and_gradient() {
        let ds = dataset();
        let view = FilteredView::apply(&ds, &FilterCriteria::all(&ds)).unwrap();
        let chart = choropleth(&country_means(&view), None);

        assert_eq!(chart.regions.len(), 4);
        assert_eq!(chart.min, 1.0);
        assert_eq!(chart.in_range.len(), 5);
        assert_eq!(chart.in_range.first().map(String::as_str), Some("#FFE0B2"));
        assert_eq!(chart.in_range.last().map(String::as_str), Some("#FF5722"));
    }

    #[test]
    fn boundary_names_from_geojson() {
        let geo = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "United States" } },
                { "type": "Feature", "properties": { "NAME": "Germany" } },
                { "type": "Feature", "properties": {} }
            ]
        });
        let names = BoundaryNames::from_geojson(&geo).unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains("United States"));
        assert!(names.contains("Germany"));
        assert!(!names.contains("Korea, Rep."));
    }

    #[test]
    fn geojson_without_features_is_rejected() {
        assert!(BoundaryNames::from_geojson(&json!({ "type": "Topology" })).is_err());
    }
}
