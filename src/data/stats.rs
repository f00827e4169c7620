use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{AgeBand, EmployeeDataset};

// ---------------------------------------------------------------------------
// Aggregates over the filtered subset
// ---------------------------------------------------------------------------
//
// Every function takes the dataset plus the filtered index slice so the
// records themselves are never copied. All of them have a defined empty
// state: an empty selection reports zeros, not NaN.

/// Headline metrics for the KPI row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean_salary: f64,
    pub mean_age: f64,
    pub mean_tenure: f64,
}

impl Summary {
    pub fn compute(dataset: &EmployeeDataset, indices: &[usize]) -> Self {
        if indices.is_empty() {
            return Summary::default();
        }
        let n = indices.len() as f64;
        let mut salary = 0.0;
        let mut age = 0.0;
        let mut tenure = 0.0;
        for &i in indices {
            let emp = &dataset.employees[i];
            salary += emp.salary;
            age += emp.age as f64;
            tenure += emp.years_at_company as f64;
        }
        Summary {
            count: indices.len(),
            mean_salary: salary / n,
            mean_age: age / n,
            mean_tenure: tenure / n,
        }
    }
}

/// Employees per department, sorted by department name.
pub fn department_counts(dataset: &EmployeeDataset, indices: &[usize]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        *counts
            .entry(dataset.employees[i].department.clone())
            .or_insert(0) += 1;
    }
    counts
}

/// Department → position → head count, for the hierarchy breakdown.
pub fn department_position_counts(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for &i in indices {
        let emp = &dataset.employees[i];
        *counts
            .entry(emp.department.clone())
            .or_default()
            .entry(emp.position.clone())
            .or_insert(0) += 1;
    }
    counts
}

/// One equal-width salary histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Midpoint, used as the bar's x position.
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bin the selection's salaries into `bins` equal-width buckets over the
/// observed range. Empty selection → empty vec; a degenerate range (every
/// salary identical) collapses into a single bucket.
pub fn salary_histogram(
    dataset: &EmployeeDataset,
    indices: &[usize],
    bins: usize,
) -> Vec<HistogramBin> {
    if indices.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &i in indices {
        let s = dataset.employees[i].salary;
        lo = lo.min(s);
        hi = hi.max(s);
    }

    if hi <= lo {
        return vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: indices.len(),
        }];
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &i in indices {
        let s = dataset.employees[i].salary;
        // The maximum falls into the last bucket, not a phantom extra one.
        let bucket = (((s - lo) / width) as usize).min(bins - 1);
        counts[bucket] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(b, count)| HistogramBin {
            lower: lo + b as f64 * width,
            upper: lo + (b + 1) as f64 * width,
            count,
        })
        .collect()
}

/// One bubble of the tenure/performance scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub tenure: i64,
    pub performance: i64,
    pub salary: f64,
    pub department: String,
    pub name: Option<String>,
}

/// Scatter tuples for the selection, in selection order.
pub fn scatter_points(dataset: &EmployeeDataset, indices: &[usize]) -> Vec<ScatterPoint> {
    indices
        .iter()
        .map(|&i| {
            let emp = &dataset.employees[i];
            ScatterPoint {
                tenure: emp.years_at_company,
                performance: emp.performance_score,
                salary: emp.salary,
                department: emp.department.clone(),
                name: emp.name.clone(),
            }
        })
        .collect()
}

/// Head count per gender; rows with no gender are skipped.
pub fn gender_counts(dataset: &EmployeeDataset, indices: &[usize]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        if let Some(g) = &dataset.employees[i].gender {
            *counts.entry(g.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Mean salary per gender; rows with no gender are skipped.
pub fn mean_salary_by_gender(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let emp = &dataset.employees[i];
        if let Some(g) = &emp.gender {
            let entry = sums.entry(g.clone()).or_insert((0.0, 0));
            entry.0 += emp.salary;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(g, (sum, n))| (g, sum / n as f64))
        .collect()
}

/// Head count per age band. Keyed on `Option<AgeBand>` so employees whose
/// age fell outside (0, 100] stay visible as their own `None` bucket.
pub fn age_band_counts(
    dataset: &EmployeeDataset,
    indices: &[usize],
) -> BTreeMap<Option<AgeBand>, usize> {
    let mut counts = BTreeMap::new();
    for &i in indices {
        *counts
            .entry(dataset.employees[i].age_band)
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AgeBand, Employee, EmployeeDataset};

    fn employee(
        department: &str,
        position: &str,
        gender: Option<&str>,
        salary: f64,
        age: i64,
        tenure: i64,
    ) -> Employee {
        Employee {
            name: Some("X".to_string()),
            department: department.to_string(),
            position: position.to_string(),
            gender: gender.map(str::to_string),
            salary,
            age,
            years_at_company: tenure,
            performance_score: 3,
            age_band: AgeBand::from_age(age),
        }
    }

    fn dataset() -> EmployeeDataset {
        EmployeeDataset::from_employees(
            vec![
                employee("Sales", "Rep", Some("Female"), 40_000.0, 25, 2),
                employee("Sales", "Rep", Some("Male"), 60_000.0, 35, 10),
                employee("Sales", "Manager", Some("Female"), 80_000.0, 50, 20),
                employee("Engineering", "Developer", None, 100_000.0, 120, 4),
            ],
            0,
        )
    }

    #[test]
    fn summary_means_over_selection() {
        let ds = dataset();
        let summary = Summary::compute(&ds, &[0, 1]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean_salary, 50_000.0);
        assert_eq!(summary.mean_age, 30.0);
        assert_eq!(summary.mean_tenure, 6.0);
    }

    #[test]
    fn empty_selection_reports_zeros() {
        let ds = dataset();
        let summary = Summary::compute(&ds, &[]);
        assert_eq!(summary, Summary::default());
        assert!(department_counts(&ds, &[]).is_empty());
        assert!(salary_histogram(&ds, &[], 15).is_empty());
        assert!(gender_counts(&ds, &[]).is_empty());
        assert!(mean_salary_by_gender(&ds, &[]).is_empty());
        assert!(age_band_counts(&ds, &[]).is_empty());
        assert!(scatter_points(&ds, &[]).is_empty());
    }

    #[test]
    fn department_and_position_counts() {
        let ds = dataset();
        let all = [0, 1, 2, 3];
        let by_dept = department_counts(&ds, &all);
        assert_eq!(by_dept["Sales"], 3);
        assert_eq!(by_dept["Engineering"], 1);

        let hierarchy = department_position_counts(&ds, &all);
        assert_eq!(hierarchy["Sales"]["Rep"], 2);
        assert_eq!(hierarchy["Sales"]["Manager"], 1);
        assert_eq!(hierarchy["Engineering"]["Developer"], 1);
    }

    #[test]
    fn histogram_covers_the_range_and_counts_everyone() {
        let ds = dataset();
        let bins = salary_histogram(&ds, &[0, 1, 2, 3], 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].lower, 40_000.0);
        assert_eq!(bins[2].upper, 100_000.0);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
        // The maximum salary lands in the last bucket.
        assert!(bins[2].count >= 1);
    }

    #[test]
    fn histogram_with_identical_salaries_is_one_bucket() {
        let ds = EmployeeDataset::from_employees(
            vec![
                employee("A", "P", None, 500.0, 30, 1),
                employee("A", "P", None, 500.0, 30, 1),
            ],
            0,
        );
        let bins = salary_histogram(&ds, &[0, 1], 15);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
    }

    #[test]
    fn gender_aggregates_skip_missing_gender() {
        let ds = dataset();
        let all = [0, 1, 2, 3];
        let counts = gender_counts(&ds, &all);
        assert_eq!(counts["Female"], 2);
        assert_eq!(counts["Male"], 1);
        assert_eq!(counts.len(), 2);

        let means = mean_salary_by_gender(&ds, &all);
        assert_eq!(means["Female"], 60_000.0);
        assert_eq!(means["Male"], 60_000.0);
    }

    #[test]
    fn age_band_counts_keep_undefined_distinct() {
        let ds = dataset();
        let counts = age_band_counts(&ds, &[0, 1, 2, 3]);
        assert_eq!(counts[&Some(AgeBand::Joven)], 1);
        assert_eq!(counts[&Some(AgeBand::Media)], 1);
        assert_eq!(counts[&Some(AgeBand::Senior)], 1);
        // Age 120 is outside every band but still counted.
        assert_eq!(counts[&None], 1);
    }

    #[test]
    fn scatter_points_follow_selection_order() {
        let ds = dataset();
        let pts = scatter_points(&ds, &[2, 0]);
        assert_eq!(pts[0].tenure, 20);
        assert_eq!(pts[1].tenure, 2);
        assert_eq!(pts[0].department, "Sales");
    }
}
