use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::Color32;

use crate::charts::cluster::{cluster_name, CLUSTER_COUNT};
use crate::charts::{self, ChartSection};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache::load_cached;
use crate::data::filter::{apply_filter, FilterKind, FilterSelection};
use crate::data::{DayRecord, RentalDataset, Season, Weather};

// ---------------------------------------------------------------------------
// Filter events
// ---------------------------------------------------------------------------

/// A user interaction with one of the filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    ToggleYear(i32),
    ToggleWeather(Weather),
    ToggleSeason(Season),
    SelectAll(FilterKind),
    SelectNone(FilterKind),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<RentalDataset>>,

    /// Path the current dataset came from.
    pub data_path: Option<PathBuf>,

    /// Current year / weather / season selection.
    pub selection: FilterSelection,

    /// Rows passing the current selection (cached).
    pub view: Vec<DayRecord>,

    /// Charts for `view`, rebuilt only when the selection changes.
    pub sections: Vec<ChartSection>,

    /// Series name → colour.
    pub colors: ColorMap,

    /// "Show DataFrame" checkbox.
    pub show_raw: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            data_path: None,
            selection: FilterSelection::default(),
            view: Vec::new(),
            sections: Vec::new(),
            colors: series_colors(&RentalDataset::default()),
            show_raw: false,
            status_message: None,
        }
    }

    /// Load (or fetch from the cache) the dataset at `path`.
    /// On failure the previous dataset, if any, stays in place.
    pub fn load(&mut self, path: &Path) {
        match load_cached(path) {
            Ok(dataset) => {
                self.data_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error loading {}: {e}", path.display()));
            }
        }
    }

    /// Ingest a newly loaded dataset, select everything and build the charts.
    pub fn set_dataset(&mut self, dataset: Arc<RentalDataset>) {
        self.selection = FilterSelection::all(&dataset);
        self.colors = series_colors(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Apply one filter interaction, then recompute the view.
    pub fn handle(&mut self, event: FilterEvent) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };
        match event {
            FilterEvent::ToggleYear(year) => self.selection.toggle_year(year),
            FilterEvent::ToggleWeather(weather) => self.selection.toggle_weather(weather),
            FilterEvent::ToggleSeason(season) => self.selection.toggle_season(season),
            FilterEvent::SelectAll(kind) => self.selection.select_all(kind, &ds),
            FilterEvent::SelectNone(kind) => self.selection.select_none(kind),
        }
        self.refilter();
    }

    /// Recompute the filtered view and every chart.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.view = apply_filter(&ds.records, &self.selection);
        self.sections = charts::build_all(&self.view);
        log::debug!("Filter applied: {} of {} rows visible", self.view.len(), ds.len());
    }
}

/// Colours for every series name the charts can produce.
fn series_colors(dataset: &RentalDataset) -> ColorMap {
    let mut names: Vec<String> = dataset.years.iter().map(|y| y.to_string()).collect();
    names.extend((0..CLUSTER_COUNT).map(cluster_name));
    ColorMap::new(&names)
        .with_override("Casual", Color32::from_rgb(0x72, 0xBC, 0xD4))
        .with_override("Registered", Color32::from_rgb(0xFF, 0x63, 0x47))
}
