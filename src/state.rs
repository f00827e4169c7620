use crate::color::DepartmentColors;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::EmployeeDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Dashboard tabs, mirroring the analytics sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Performance,
    Diversity,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Performance, Tab::Diversity];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Performance => "Performance & Salaries",
            Tab::Diversity => "Diversity & Inclusion",
        }
    }
}

/// The full UI state, independent of rendering.
///
/// The dataset is built once per load and never mutated afterwards; every
/// criterion change only recomputes `visible_indices`.
pub struct AppState {
    /// Cleaned roster (None until the user loads a file).
    pub dataset: Option<EmployeeDataset>,

    /// Live filter criteria, rebuilt from the extents on each load.
    pub criteria: FilterCriteria,

    /// Indices of employees passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Stable department → colour assignment for chart series.
    pub colors: Option<DepartmentColors>,

    /// Currently selected dashboard tab.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            colors: None,
            tab: Tab::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset; reset criteria to the identity
    /// filter and rebuild the colour assignment.
    pub fn set_dataset(&mut self, dataset: EmployeeDataset) {
        self.criteria = FilterCriteria::unrestricted(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.colors = Some(DepartmentColors::new(&dataset.departments));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after any criterion change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
        }
    }

    /// Tick/untick one department in the multi-select.
    pub fn toggle_department(&mut self, department: &str) {
        self.criteria.departments.toggle(department);
        self.refilter();
    }

    /// Tick/untick one gender in the multi-select.
    pub fn toggle_gender(&mut self, gender: &str) {
        self.criteria.genders.toggle(gender);
        self.refilter();
    }

    /// Drop every criterion back to the identity filter.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::unrestricted(ds);
            self.visible_indices = (0..ds.len()).collect();
        }
    }
}
