/// Data layer: core types, loading, caching, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawDayRow → RentalDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  once per path, shared Arc<RentalDataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year / weather / season membership → filtered view
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::DataLoadError;
pub use model::{DayRecord, RentalDataset, Season, Weather};
