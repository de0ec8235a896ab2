/// Chart layer: pure transforms from the filtered rows to a [`Chart`] value.
///
/// Nothing here touches egui; `ui::chart` draws whatever these functions
/// return. Every transform accepts an empty slice without failing.
///
/// ```text
///   &[DayRecord] ──► seasonal / monthly / holiday / weather /
///                    temperature / weekly / cluster ──► Chart
/// ```

pub mod cluster;
pub mod holiday;
pub mod monthly;
pub mod seasonal;
pub mod temperature;
pub mod weather;
pub mod weekly;

use crate::data::DayRecord;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// A rendered-independent description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// A blank plot frame.
    Empty,
    /// Explanatory text only, no axes.
    Placeholder(String),
    Bars(CategorySeries),
    Lines(CategorySeries),
    Scatter(ScatterData),
}

/// Values over a fixed list of x-axis categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    /// Print each value above its bar.
    pub annotate_values: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// One entry per category; `None` is drawn as a gap.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterData {
    pub groups: Vec<PointGroup>,
    pub fits: Vec<RegressionLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub opacity: f32,
}

/// A fitted line drawn between `x_min` and `x_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionLine {
    pub name: String,
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Chart {
    pub fn new(title: &str, x_label: &str, y_label: &str, body: ChartBody) -> Self {
        Chart {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            body,
        }
    }

    /// Look up a series by name (bar and line charts only).
    pub fn series(&self, name: &str) -> Option<&Series> {
        match &self.body {
            ChartBody::Bars(cs) | ChartBody::Lines(cs) => cs.series.iter().find(|s| s.name == name),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard sections
// ---------------------------------------------------------------------------

/// A chart plus the heading shown above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSection {
    pub heading: &'static str,
    pub chart: Chart,
}

/// Build all seven dashboard charts, in display order.
pub fn build_all(rows: &[DayRecord]) -> Vec<ChartSection> {
    vec![
        ChartSection {
            heading: "Bike Rentals by Season and Year",
            chart: seasonal::seasonal_totals(rows),
        },
        ChartSection {
            heading: "Average Daily Rentals by User Type and Month",
            chart: monthly::monthly_user_trend(rows),
        },
        ChartSection {
            heading: "Comparison of User Types on Holidays vs Working Days",
            chart: holiday::holiday_comparison(rows),
        },
        ChartSection {
            heading: "Average Daily Rentals by Weather Situation",
            chart: weather::weather_impact(rows),
        },
        ChartSection {
            heading: "Temperature vs Total Rentals by Year",
            chart: temperature::temperature_correlation(rows),
        },
        ChartSection {
            heading: "Average Daily Rentals by Day of Week and User Type",
            chart: weekly::weekly_pattern(rows),
        },
        ChartSection {
            heading: "Bike Rentals Clusters based on Temperature and Count",
            chart: cluster::cluster_view(rows),
        },
    ]
}

// ---------------------------------------------------------------------------
// Grouping helper
// ---------------------------------------------------------------------------

/// Running mean of casual and registered counts for one group.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UserTypeMean {
    casual: f64,
    registered: f64,
    n: usize,
}

impl UserTypeMean {
    pub(crate) fn add(&mut self, rec: &DayRecord) {
        self.casual += rec.casual as f64;
        self.registered += rec.registered as f64;
        self.n += 1;
    }

    pub(crate) fn casual(&self) -> Option<f64> {
        (self.n > 0).then(|| self.casual / self.n as f64)
    }

    pub(crate) fn registered(&self) -> Option<f64> {
        (self.n > 0).then(|| self.registered / self.n as f64)
    }
}

/// "Casual" / "Registered" series from per-category means.
pub(crate) fn user_type_series(groups: &[UserTypeMean]) -> Vec<Series> {
    vec![
        Series {
            name: "Casual".to_string(),
            values: groups.iter().map(UserTypeMean::casual).collect(),
        },
        Series {
            name: "Registered".to_string(),
            values: groups.iter().map(UserTypeMean::registered).collect(),
        },
    ]
}
