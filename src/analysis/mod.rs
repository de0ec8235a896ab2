//! Numeric helpers behind the charts: least-squares fits and k-means.

pub mod kmeans;
pub mod regression;

pub use kmeans::{Clustering, KMeans};
pub use regression::LinearFit;
