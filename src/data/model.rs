use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// AgeBand – derived generational bucket
// ---------------------------------------------------------------------------

/// Generational bucket derived from `age` by half-open intervals:
/// `Joven` for (0, 30], `Media` for (30, 45], `Senior` for (45, 100].
///
/// Ages outside (0, 100] carry no band; callers keep that state as
/// `Option<AgeBand>` rather than folding it into a neighbouring bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBand {
    Joven,
    Media,
    Senior,
}

impl AgeBand {
    /// Bucket an age, or `None` when the age is outside (0, 100].
    pub fn from_age(age: i64) -> Option<AgeBand> {
        match age {
            1..=30 => Some(AgeBand::Joven),
            31..=45 => Some(AgeBand::Media),
            46..=100 => Some(AgeBand::Senior),
            _ => None,
        }
    }

    /// All bands in display order.
    pub const ALL: [AgeBand; 3] = [AgeBand::Joven, AgeBand::Media, AgeBand::Senior];
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeBand::Joven => write!(f, "Joven (<30)"),
            AgeBand::Media => write!(f, "Media (30-45)"),
            AgeBand::Senior => write!(f, "Senior (>45)"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawEmployee – one row as read from the source, before cleaning
// ---------------------------------------------------------------------------

/// A roster row as the loader hands it over: text fields untrimmed, salary
/// kept as raw text because the source routinely contains unparseable
/// values. The integer fields are strict-parsed by the loader itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEmployee {
    pub name: Option<String>,
    pub department: String,
    pub position: String,
    pub gender: Option<String>,
    /// Raw salary text; `None` when the cell is absent/blank.
    pub salary: Option<String>,
    pub age: i64,
    pub years_at_company: i64,
    pub performance_score: i64,
}

// ---------------------------------------------------------------------------
// Employee – one canonical record, immutable after cleaning
// ---------------------------------------------------------------------------

/// A cleaned employee record. Invariants established by the cleaning
/// pipeline: `department`/`position` are trimmed and title-cased, `salary`
/// is always present (imputed where the source was malformed), and
/// `years_at_company <= age - 18`.
///
/// Serializes with stable field names so presentation consumers can bind
/// columns without re-deriving them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub name: Option<String>,
    pub department: String,
    pub position: String,
    pub gender: Option<String>,
    pub salary: f64,
    pub age: i64,
    pub years_at_company: i64,
    pub performance_score: i64,
    pub age_band: Option<AgeBand>,
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete cleaned roster
// ---------------------------------------------------------------------------

/// The canonical roster plus the pre-computed indices the filter panel
/// needs: sorted categorical universes and observed numeric extents.
///
/// Built once per load and never mutated; the filter engine only reads it.
#[derive(Debug, Clone)]
pub struct EmployeeDataset {
    /// All employees in source order.
    pub employees: Vec<Employee>,
    /// Sorted unique departments (post-normalization).
    pub departments: BTreeSet<String>,
    /// Sorted unique genders; rows with no gender are not represented here.
    pub genders: BTreeSet<String>,
    /// Observed `[min, max]` of salary, or `(0, 0)` for an empty roster.
    pub salary_extent: (f64, f64),
    /// Observed `[min, max]` of age.
    pub age_extent: (i64, i64),
    /// Observed `[min, max]` of performance score.
    pub performance_extent: (i64, i64),
    /// Hash of the source bytes; callers caching derived artifacts key on
    /// this rather than on process lifetime.
    pub fingerprint: u64,
}

impl EmployeeDataset {
    /// Build the categorical universes and numeric extents from a cleaned
    /// roster.
    pub fn from_employees(employees: Vec<Employee>, fingerprint: u64) -> Self {
        let mut departments = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut salary_extent = (f64::INFINITY, f64::NEG_INFINITY);
        let mut age_extent = (i64::MAX, i64::MIN);
        let mut performance_extent = (i64::MAX, i64::MIN);

        for emp in &employees {
            departments.insert(emp.department.clone());
            if let Some(g) = &emp.gender {
                genders.insert(g.clone());
            }
            salary_extent.0 = salary_extent.0.min(emp.salary);
            salary_extent.1 = salary_extent.1.max(emp.salary);
            age_extent.0 = age_extent.0.min(emp.age);
            age_extent.1 = age_extent.1.max(emp.age);
            performance_extent.0 = performance_extent.0.min(emp.performance_score);
            performance_extent.1 = performance_extent.1.max(emp.performance_score);
        }

        if employees.is_empty() {
            salary_extent = (0.0, 0.0);
            age_extent = (0, 0);
            performance_extent = (0, 0);
        }

        EmployeeDataset {
            employees,
            departments,
            genders,
            salary_extent,
            age_extent,
            performance_extent,
            fingerprint,
        }
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
