use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::filter::{self, FilterSelection, Subset, ALL};
use crate::data::model::Dataset;
use crate::data::report::{self, Report};
use crate::data::{export, loader};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

/// One-line message in the top bar, coloured by whether it reports a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Store location, kept for reloads.
    pub db: PathBuf,
    pub table: String,

    /// Loaded dataset (None when the last load failed).
    pub dataset: Option<Dataset>,

    /// Fatal load error. While set, nothing but the error is shown.
    pub load_error: Option<String>,

    /// Dropdown labels, `"All"` meaning unconstrained.
    pub region: String,
    pub category: String,
    pub year: String,

    /// Selection parsed from the labels above.
    pub selection: FilterSelection,

    /// Report for the current selection.
    pub report: Option<Report>,

    /// Stable per-label colours for the region and category charts.
    pub region_colors: ColorMap,
    pub category_colors: ColorMap,

    /// Status / error message shown in the top bar.
    pub status: Option<Status>,
}

impl AppState {
    /// Build the state and perform the initial load.
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            db: config.db.clone(),
            table: config.table.clone(),
            dataset: None,
            load_error: None,
            region: config.region.clone(),
            category: config.category.clone(),
            year: config.year.clone(),
            selection: FilterSelection::default(),
            report: None,
            region_colors: ColorMap::default(),
            category_colors: ColorMap::default(),
            status: None,
        };
        state.reload();
        state
    }

    /// Re-read the store and rebuild everything downstream.
    pub fn reload(&mut self) {
        match loader::load(&self.db, &self.table) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load data: {e}");
                self.dataset = None;
                self.report = None;
                self.load_error = Some(format!("Error loading data: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset colours and recompute the report.
    /// Any message from before the reload no longer applies and is cleared.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.status = None;
        self.region_colors = ColorMap::new(&dataset.regions());
        self.category_colors = ColorMap::new(&dataset.categories());
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refilter();
    }

    /// Recompute the selection and report after a label change.
    pub fn refilter(&mut self) {
        let selection = match FilterSelection::from_labels(&self.region, &self.category, &self.year)
        {
            Ok(selection) => selection,
            Err(e) => {
                log::warn!("{e}; falling back to all years");
                self.status = Some(Status::error(e.to_string()));
                self.year = ALL.to_string();
                FilterSelection::from_labels(&self.region, &self.category, ALL).unwrap_or_default()
            }
        };
        if let Some(dataset) = &self.dataset {
            self.report = Some(report::render(dataset, &selection));
        }
        self.selection = selection;
    }

    pub fn set_region(&mut self, label: String) {
        self.region = label;
        self.refilter();
    }

    pub fn set_category(&mut self, label: String) {
        self.category = label;
        self.refilter();
    }

    pub fn set_year(&mut self, label: String) {
        self.year = label;
        self.refilter();
    }

    /// Rows passing the current selection.
    pub fn subset(&self) -> Subset<'_> {
        match &self.dataset {
            Some(ds) => filter::apply(ds, &self.selection),
            None => Subset::default(),
        }
    }

    /// Write the current subset as CSV. The outcome lands in the status line.
    pub fn export_to(&mut self, path: &Path) {
        self.status = Some(match export::write_csv(path, &self.subset()) {
            Ok(_) => Status::info(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Status::error(format!("Error: {e:#}"))
            }
        });
    }

    /// Dropdown options: `"All"` followed by the distinct observed values.
    pub fn region_options(&self) -> Vec<String> {
        with_all(self.dataset.as_ref().map(Dataset::regions))
    }

    pub fn category_options(&self) -> Vec<String> {
        with_all(self.dataset.as_ref().map(Dataset::categories))
    }

    pub fn year_options(&self) -> Vec<String> {
        with_all(
            self.dataset
                .as_ref()
                .map(|ds| ds.years().iter().map(i32::to_string).collect()),
        )
    }
}

fn with_all(values: Option<Vec<String>>) -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(values.unwrap_or_default())
        .collect()
}
