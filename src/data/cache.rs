use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use super::error::DataLoadError;
use super::loader::load_file;
use super::model::RentalDataset;

type Cache = Mutex<HashMap<PathBuf, Arc<RentalDataset>>>;

static DATASETS: OnceLock<Cache> = OnceLock::new();

/// Load a dataset once per path for the lifetime of the process.
///
/// The file is read while the cache lock is held, so concurrent callers asking
/// for the same path never read it twice. Failed loads are not cached.
pub fn load_cached(path: &Path) -> Result<Arc<RentalDataset>, DataLoadError> {
    let cache = DATASETS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(ds) = map.get(path) {
        log::debug!("Dataset cache hit for {}", path.display());
        return Ok(Arc::clone(ds));
    }

    let dataset = Arc::new(load_file(path)?);
    log::info!(
        "Loaded {} daily records from {} (years {:?})",
        dataset.len(),
        path.display(),
        dataset.years
    );
    map.insert(path.to_path_buf(), Arc::clone(&dataset));
    Ok(dataset)
}
