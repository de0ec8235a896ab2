use std::collections::BTreeSet;

use super::model::{DayRecord, RentalDataset, Season, Weather};

// ---------------------------------------------------------------------------
// Filter predicate: which years / weathers / seasons are selected
// ---------------------------------------------------------------------------

/// Which of the three filter controls an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Year,
    Weather,
    Season,
}

/// Current selection of the three multi-select controls.
/// An empty set selects nothing, so no rows pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub weathers: BTreeSet<Weather>,
    pub seasons: BTreeSet<Season>,
}

impl FilterSelection {
    /// Every option present in the dataset selected (i.e., show everything).
    pub fn all(dataset: &RentalDataset) -> Self {
        FilterSelection {
            years: dataset.years.clone(),
            weathers: dataset.weathers.clone(),
            seasons: dataset.seasons.clone(),
        }
    }

    /// Whether a single record passes all three membership predicates.
    pub fn matches(&self, record: &DayRecord) -> bool {
        self.years.contains(&record.year)
            && self.weathers.contains(&record.weather)
            && self.seasons.contains(&record.season)
    }

    pub fn toggle_year(&mut self, year: i32) {
        toggle(&mut self.years, year);
    }

    pub fn toggle_weather(&mut self, weather: Weather) {
        toggle(&mut self.weathers, weather);
    }

    pub fn toggle_season(&mut self, season: Season) {
        toggle(&mut self.seasons, season);
    }

    /// Select every option of one control.
    pub fn select_all(&mut self, kind: FilterKind, dataset: &RentalDataset) {
        match kind {
            FilterKind::Year => self.years = dataset.years.clone(),
            FilterKind::Weather => self.weathers = dataset.weathers.clone(),
            FilterKind::Season => self.seasons = dataset.seasons.clone(),
        }
    }

    /// Deselect every option of one control.
    pub fn select_none(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Year => self.years.clear(),
            FilterKind::Weather => self.weathers.clear(),
            FilterKind::Season => self.seasons.clear(),
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Return indices of records that pass the selection, in dataset order.
pub fn filtered_indices(dataset: &RentalDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Materialise the filtered view. The input slice is left untouched.
pub fn apply_filter(records: &[DayRecord], selection: &FilterSelection) -> Vec<DayRecord> {
    records
        .iter()
        .filter(|rec| selection.matches(rec))
        .copied()
        .collect()
}
