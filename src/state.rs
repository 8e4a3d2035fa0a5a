use std::sync::Arc;

use crate::data::filter::{filtered_indices, AgeRange, FilterCriteria, FilteredView};
use crate::data::model::{Dataset, Gender};
use crate::error::DashboardError;
use crate::views::categorical::Habit;
use crate::views::correlation::HealthMetric;
use crate::views::{self, Panel, View, ViewOptions};

/// Warning surfaced when the filters select nothing.
pub const EMPTY_RESULT_MESSAGE: &str = "No data matches the current filters; adjust the criteria.";

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full interaction state, independent of rendering.
#[derive(Default)]
pub struct DashboardState {
    /// Loaded dataset (None until one is set).
    pub dataset: Option<Arc<Dataset>>,

    /// Sidebar selections. `None` until a dataset is set.
    pub criteria: Option<FilterCriteria>,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Dropdown selections and styling for the views.
    pub options: ViewOptions,

    /// Status / warning message for the user.
    pub status_message: Option<String>,
}

impl DashboardState {
    /// Ingest a newly loaded dataset and reset the filters to show everything.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.criteria = Some(FilterCriteria::all(&dataset));
        self.dataset = Some(dataset);
        self.refilter();
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        let (Some(ds), Some(criteria)) = (&self.dataset, &self.criteria) else {
            return;
        };
        self.visible_indices = filtered_indices(ds, criteria);
        if self.visible_indices.is_empty() {
            log::warn!("{EMPTY_RESULT_MESSAGE}");
            self.status_message = Some(EMPTY_RESULT_MESSAGE.to_string());
        } else {
            self.status_message = None;
        }
    }

    fn update_criteria(&mut self, f: impl FnOnce(&mut FilterCriteria)) {
        if let Some(criteria) = self.criteria.as_mut() {
            f(criteria);
            self.refilter();
        }
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        self.update_criteria(|c| {
            if !c.countries.remove(country) {
                c.countries.insert(country.to_string());
            }
        });
    }

    /// Toggle a single gender in the selection.
    pub fn toggle_gender(&mut self, gender: Gender) {
        self.update_criteria(|c| {
            if !c.genders.remove(&gender) {
                c.genders.insert(gender);
            }
        });
    }

    /// Replace the country selection.
    pub fn select_countries<I, S>(&mut self, countries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected = countries.into_iter().map(Into::into).collect();
        self.update_criteria(|c| c.countries = selected);
    }

    /// Replace the gender selection.
    pub fn select_genders(&mut self, genders: impl IntoIterator<Item = Gender>) {
        let selected = genders.into_iter().collect();
        self.update_criteria(|c| c.genders = selected);
    }

    /// Select every country in the dataset.
    pub fn select_all_countries(&mut self) {
        if let Some(all) = self.dataset.as_ref().map(|ds| ds.countries.clone()) {
            self.update_criteria(|c| c.countries = all);
        }
    }

    /// Deselect all countries.
    pub fn select_no_countries(&mut self) {
        self.update_criteria(|c| c.countries.clear());
    }

    pub fn set_age_range(&mut self, min: u32, max: u32) -> Result<(), DashboardError> {
        let range = AgeRange::new(min, max)?;
        self.update_criteria(|c| c.age = range);
        Ok(())
    }

    pub fn set_metric(&mut self, metric: HealthMetric) {
        self.options.metric = metric;
    }

    pub fn set_habit(&mut self, habit: Habit) {
        self.options.habit = habit;
    }

    /// The records currently visible, or [`DashboardError::EmptyResult`].
    pub fn filtered_view(&self) -> Result<FilteredView<'_>, DashboardError> {
        let dataset = self.dataset.as_deref().ok_or(DashboardError::EmptyResult)?;
        FilteredView::new(dataset, self.visible_indices.clone())
    }

    /// Render one tab for the current selection.
    pub fn render(&self, view: View) -> Result<Panel, DashboardError> {
        let filtered = self.filtered_view()?;
        Ok(views::render(view, &filtered, &self.options))
    }

    /// Render every tab, in tab order.
    pub fn render_all(&self) -> Result<Vec<(View, Panel)>, DashboardError> {
        let filtered = self.filtered_view()?;
        Ok(View::ALL
            .iter()
            .map(|&view| (view, views::render(view, &filtered, &self.options)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn loaded() -> DashboardState {
        let mut state = DashboardState::default();
        state.set_dataset(Arc::new(Dataset::from_records(vec![
            record("US", Gender::Male, 25, 3.0),
            record("US", Gender::Female, 45, 5.0),
            record("UK", Gender::Male, 70, 1.0),
        ])));
        state
    }

    #[test]
    fn set_dataset_applies_default_filters() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn rendering_before_load_is_empty_result() {
        let state = DashboardState::default();
        assert_eq!(state.render(View::Kpi), Err(DashboardError::EmptyResult));
    }

    #[test]
    fn deselecting_everything_warns_and_skips_rendering() {
        let mut state = loaded();
        state.select_no_countries();

        assert!(state.visible_indices.is_empty());
        assert_eq!(state.status_message.as_deref(), Some(EMPTY_RESULT_MESSAGE));
        assert_eq!(state.render_all().unwrap_err(), DashboardError::EmptyResult);

        state.select_all_countries();
        assert!(state.status_message.is_none());
        assert_eq!(state.render_all().unwrap().len(), 5);
    }

    #[test]
    fn toggles_narrow_the_view() {
        let mut state = loaded();
        state.set_age_range(0, 100).unwrap();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);

        state.toggle_gender(Gender::Female);
        assert_eq!(state.visible_indices, vec![0, 2]);

        state.toggle_country("UK");
        assert_eq!(state.visible_indices, vec![0]);

        state.toggle_country("UK");
        state.toggle_gender(Gender::Female);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn inverted_age_range_keeps_previous_selection() {
        let mut state = loaded();
        assert_eq!(
            state.set_age_range(50, 10),
            Err(DashboardError::InvalidAgeRange { min: 50, max: 10 })
        );
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn kpi_panel_reflects_filters() {
        let mut state = loaded();
        state.select_countries(["US"]);
        state.select_genders([Gender::Male]);
        state.set_metric(HealthMetric::Bmi);
        state.set_habit(Habit::PhysicalActivityHours);

        let Panel::Kpi(cards) = state.render(View::Kpi).unwrap() else {
            panic!("expected metric cards");
        };
        assert_eq!(cards[0].value, 3.0);
    }
}
