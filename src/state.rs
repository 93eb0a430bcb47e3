use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ExplorerConfig;
use crate::data::aggregate::{distributions, Distributions};
use crate::data::filter::{apply, FilterSelection, FilteredDataset};
use crate::data::loader::{load_file, LoadError};
use crate::data::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// Loaded roster (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// File the current roster came from.
    pub source_path: Option<PathBuf>,

    /// Per-column filter selections.
    pub selection: FilterSelection,

    /// Rows passing the current selection (cached).
    pub filtered: Option<FilteredDataset>,

    /// Chart data for the current view (cached).
    pub distributions: Distributions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            dataset: None,
            source_path: None,
            selection: FilterSelection::default(),
            filtered: None,
            distributions: Distributions::NoResults,
            status_message: None,
        }
    }

    /// Load `path`, replacing the current roster on success.
    ///
    /// On failure the previous roster (if any) stays and the error is kept
    /// in `status_message`.
    pub fn load_path(&mut self, path: &Path) -> Result<(), LoadError> {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    dataset.len(),
                    dataset.columns(),
                    path.display()
                );
                if dataset.is_empty() {
                    log::warn!("{} has no rows", path.display());
                }
                if !dataset.dropped_columns().is_empty() {
                    log::warn!("Dropped empty columns {:?}", dataset.dropped_columns());
                }
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded roster and reset filters.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(Arc::new(dataset));
        self.selection.clear_all();
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and chart data after a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let filtered = apply(ds, &self.selection);
        log::debug!("{} of {} rows visible", filtered.len(), ds.len());
        self.distributions = distributions(&filtered, self.config.charts);
        self.filtered = Some(filtered);
    }

    /// Toggle a single value in a column's multiselect.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        self.selection.toggle(column, value);
        self.refilter();
    }

    /// Clear one column's multiselect.
    pub fn clear_filter(&mut self, column: &str) {
        self.selection.clear(column);
        self.refilter();
    }

    pub fn clear_all_filters(&mut self) {
        self.selection.clear_all();
        self.refilter();
    }

    /// Number of rows in the current view.
    pub fn visible_rows(&self) -> usize {
        self.filtered.as_ref().map_or(0, FilteredDataset::len)
    }
}
