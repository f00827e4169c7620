use std::collections::BTreeSet;

use super::model::{Employee, EmployeeDataset};

// ---------------------------------------------------------------------------
// Categorical selection
// ---------------------------------------------------------------------------

/// State of one categorical multi-select.
///
/// `Unrestricted` means "no constraint", matching the dashboard convention
/// that a cleared multi-select shows everything. An explicit
/// `RestrictedTo` with an empty set matches nothing; the two states are
/// kept distinct so "all" and "none" cannot be confused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unrestricted,
    RestrictedTo(BTreeSet<String>),
}

impl Selection {
    /// Whether a record's value passes this selection. A record with no
    /// value passes only when the selection is unrestricted.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selection::Unrestricted => true,
            Selection::RestrictedTo(set) => value.is_some_and(|v| set.contains(v)),
        }
    }

    /// Whether a given value is currently ticked in the UI sense:
    /// unrestricted shows every box ticked.
    pub fn is_selected(&self, value: &str) -> bool {
        match self {
            Selection::Unrestricted => true,
            Selection::RestrictedTo(set) => set.contains(value),
        }
    }

    /// Flip one value. Starting from `Unrestricted`, ticking a value
    /// restricts to just that value; removing the last restricted value
    /// returns to `Unrestricted` (the cleared-multi-select state).
    pub fn toggle(&mut self, value: &str) {
        match self {
            Selection::Unrestricted => {
                let mut set = BTreeSet::new();
                set.insert(value.to_string());
                *self = Selection::RestrictedTo(set);
            }
            Selection::RestrictedTo(set) => {
                if !set.remove(value) {
                    set.insert(value.to_string());
                }
                if set.is_empty() {
                    *self = Selection::Unrestricted;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric range
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` bound. Unlike the categorical selections a range
/// is always active; `min > max` simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> RangeFilter<T> {
    pub fn new(min: T, max: T) -> Self {
        RangeFilter { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// Filter criteria – the full conjunction
// ---------------------------------------------------------------------------

/// One invocation's worth of filter state. Not persisted; rebuilt from the
/// dataset extents whenever a new roster is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against the employee name.
    /// Blank means "match all"; a record with no name never matches a
    /// non-blank query.
    pub name_query: String,
    pub departments: Selection,
    pub genders: Selection,
    pub salary: RangeFilter<f64>,
    pub age: RangeFilter<i64>,
    pub performance: RangeFilter<i64>,
}

impl Default for FilterCriteria {
    /// Placeholder criteria for when no dataset is loaded yet; real
    /// criteria come from [`FilterCriteria::unrestricted`].
    fn default() -> Self {
        FilterCriteria {
            name_query: String::new(),
            departments: Selection::Unrestricted,
            genders: Selection::Unrestricted,
            salary: RangeFilter::new(f64::MIN, f64::MAX),
            age: RangeFilter::new(i64::MIN, i64::MAX),
            performance: RangeFilter::new(i64::MIN, i64::MAX),
        }
    }
}

impl FilterCriteria {
    /// The identity criteria for a dataset: nothing restricted, numeric
    /// ranges at the full observed extent.
    pub fn unrestricted(dataset: &EmployeeDataset) -> Self {
        FilterCriteria {
            name_query: String::new(),
            departments: Selection::Unrestricted,
            genders: Selection::Unrestricted,
            salary: RangeFilter::new(dataset.salary_extent.0, dataset.salary_extent.1),
            age: RangeFilter::new(dataset.age_extent.0, dataset.age_extent.1),
            performance: RangeFilter::new(
                dataset.performance_extent.0,
                dataset.performance_extent.1,
            ),
        }
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, emp: &Employee) -> bool {
        if !self.departments.admits(Some(emp.department.as_str())) {
            return false;
        }
        if !self.genders.admits(emp.gender.as_deref()) {
            return false;
        }
        if !self.salary.contains(emp.salary)
            || !self.age.contains(emp.age)
            || !self.performance.contains(emp.performance_score)
        {
            return false;
        }

        let query = self.name_query.trim();
        if !query.is_empty() {
            let Some(name) = &emp.name else {
                return false;
            };
            if !name.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Return indices of employees passing all active criteria, in source
/// order. Never errors for well-formed criteria; an inverted range just
/// yields an empty result.
pub fn filtered_indices(dataset: &EmployeeDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .employees
        .iter()
        .enumerate()
        .filter(|(_, emp)| criteria.matches(emp))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AgeBand, Employee, EmployeeDataset};

    fn employee(name: Option<&str>, department: &str, gender: Option<&str>) -> Employee {
        Employee {
            name: name.map(str::to_string),
            department: department.to_string(),
            position: "Analyst".to_string(),
            gender: gender.map(str::to_string),
            salary: 50_000.0,
            age: 35,
            years_at_company: 5,
            performance_score: 3,
            age_band: AgeBand::from_age(35),
        }
    }

    fn dataset() -> EmployeeDataset {
        EmployeeDataset::from_employees(
            vec![
                employee(Some("John Smith"), "Sales", Some("Male")),
                employee(Some("Jane Doe"), "Engineering", Some("Female")),
                employee(None, "Sales", None),
                employee(Some("Johnny Cash"), "Engineering", Some("Male")),
            ],
            0,
        )
    }

    #[test]
    fn identity_criteria_keep_everything_in_order() {
        let ds = dataset();
        let criteria = FilterCriteria::unrestricted(&ds);
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2, 3]);
    }

    #[test]
    fn restricted_department_selection() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.departments.toggle("Sales");
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 2]);
    }

    #[test]
    fn explicit_empty_selection_matches_nothing() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.departments = Selection::RestrictedTo(BTreeSet::new());
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn toggling_the_last_value_off_returns_to_unrestricted() {
        let mut sel = Selection::Unrestricted;
        sel.toggle("Sales");
        assert_eq!(
            sel,
            Selection::RestrictedTo(BTreeSet::from(["Sales".to_string()]))
        );
        sel.toggle("Sales");
        assert_eq!(sel, Selection::Unrestricted);
    }

    #[test]
    fn record_without_gender_fails_a_restricted_gender_filter() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.genders.toggle("Male");
        // Row 2 has no gender: admitted only while unrestricted.
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 3]);
    }

    #[test]
    fn disjoint_salary_range_yields_empty_result() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.salary = RangeFilter::new(1_000_000.0, 2_000_000.0);
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn inverted_range_yields_empty_result_not_an_error() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.age = RangeFilter::new(60, 20);
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn name_query_is_case_insensitive_substring() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.name_query = "john".to_string();
        // Matches "John Smith" and "Johnny Cash"; never the nameless row.
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 3]);
    }

    #[test]
    fn blank_name_query_matches_all() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.name_query = "   ".to_string();
        assert_eq!(filtered_indices(&ds, &criteria).len(), ds.len());
    }

    #[test]
    fn predicates_compose_conjunctively() {
        let ds = dataset();
        let mut criteria = FilterCriteria::unrestricted(&ds);
        criteria.departments.toggle("Engineering");
        criteria.name_query = "john".to_string();
        assert_eq!(filtered_indices(&ds, &criteria), vec![3]);
    }
}
