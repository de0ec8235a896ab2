//! Interactive dashboard over the daily bike-sharing rental table.
//!
//! `data` loads and filters the table, `charts` turns the filtered rows into
//! chart descriptions, and `app` / `ui` draw them with egui.

pub mod analysis;
pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;

pub use data::{DataLoadError, DayRecord, RentalDataset};
