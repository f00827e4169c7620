use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{AgeBand, Employee, RawEmployee};

// ---------------------------------------------------------------------------
// Cleaning pipeline: raw rows → canonical employees
// ---------------------------------------------------------------------------

/// Errors the pipeline cannot repair locally. Per the propagation policy,
/// any of these aborts the whole load rather than producing a
/// partially-cleaned roster.
#[derive(Debug, Error, PartialEq)]
pub enum CleanError {
    /// A department contains rows with missing salaries but not a single
    /// parseable one to derive the imputation median from.
    #[error("department '{department}' has no parseable salary to impute from")]
    EmptyDepartment { department: String },
}

/// Transform raw roster rows into canonical records.
///
/// Pure and deterministic; the host may cache the result keyed on the
/// source fingerprint. Steps run in a fixed order because later ones read
/// state established by earlier ones:
///
/// 1. trim + title-case `department` and `position`
/// 2. coerce `salary` text to a number (failures become missing, not zero)
/// 3. impute missing salaries with the median of the *normalized*
///    department's parseable salaries
/// 4. clamp `years_at_company` to `age - 18` where it exceeds that bound
/// 5. derive the age band from the (uncorrected) age
///
/// Idempotent: running the pipeline over its own output is a no-op.
pub fn clean(raw: Vec<RawEmployee>) -> Result<Vec<Employee>, CleanError> {
    // Steps 1–2 are per-row; salary stays Option until imputation.
    let rows: Vec<(RawEmployee, String, String, Option<f64>)> = raw
        .into_iter()
        .map(|row| {
            let department = title_case(&row.department);
            let position = title_case(&row.position);
            let salary = row.salary.as_deref().and_then(parse_salary);
            (row, department, position, salary)
        })
        .collect();

    // Step 3: group by normalized department, median over parseable
    // salaries only. Imputation happens before any record is emitted so an
    // imputed value can never feed its own median.
    let mut by_department: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (_, department, _, salary) in &rows {
        let group = by_department.entry(department.as_str()).or_default();
        if let Some(s) = salary {
            group.push(*s);
        }
    }
    let mut medians: BTreeMap<String, Option<f64>> = BTreeMap::new();
    for (department, salaries) in by_department {
        medians.insert(department.to_string(), median(salaries));
    }

    rows.into_iter()
        .map(|(row, department, position, salary)| {
            let salary = match salary {
                Some(s) => s,
                None => medians
                    .get(&department)
                    .copied()
                    .flatten()
                    .ok_or_else(|| CleanError::EmptyDepartment {
                        department: department.clone(),
                    })?,
            };

            // Step 4: the correction uses the original age and is applied
            // per record, after all numeric coercion.
            let years_at_company = if row.years_at_company > row.age - 18 {
                row.age - 18
            } else {
                row.years_at_company
            };

            Ok(Employee {
                name: row.name,
                department,
                position,
                gender: row.gender,
                salary,
                age: row.age,
                years_at_company,
                performance_score: row.performance_score,
                age_band: AgeBand::from_age(row.age),
            })
        })
        .collect()
}

/// Trim and title-case a text field: first letter of each
/// whitespace-separated word upper-cased, the rest lower-cased, single
/// spaces between words.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    out
}

/// Coerce raw salary text to a finite number; anything else is missing.
fn parse_salary(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Median of a sample; the mean of the two middle values for even sizes.
/// `None` for an empty sample.
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(department: &str, salary: Option<&str>) -> RawEmployee {
        RawEmployee {
            name: Some("Ann".to_string()),
            department: department.to_string(),
            position: "analyst".to_string(),
            gender: Some("Female".to_string()),
            salary: salary.map(str::to_string),
            age: 40,
            years_at_company: 5,
            performance_score: 3,
        }
    }

    #[test]
    fn title_case_normalizes_padding_and_casing() {
        assert_eq!(title_case("  engineering "), "Engineering");
        assert_eq!(title_case("hUMAN   resources"), "Human Resources");
        assert_eq!(title_case("Sales"), "Sales");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn missing_salary_gets_department_median() {
        let cleaned = clean(vec![
            raw(" engineering ", Some("50000")),
            raw("Engineering", None),
        ])
        .unwrap();

        assert_eq!(cleaned[0].department, "Engineering");
        assert_eq!(cleaned[1].department, "Engineering");
        assert_eq!(cleaned[1].salary, 50_000.0);
    }

    #[test]
    fn median_uses_only_parseable_salaries_in_the_same_department() {
        let cleaned = clean(vec![
            raw("Sales", Some("30000")),
            raw("Sales", Some("50000")),
            raw("Sales", Some("90000")),
            raw("Sales", Some("not a number")),
            raw("Engineering", Some("200000")),
        ])
        .unwrap();

        // Three parseable Sales values: median is 50000, the Engineering
        // salary plays no part.
        assert_eq!(cleaned[3].salary, 50_000.0);
    }

    #[test]
    fn even_sized_group_medians_average_the_middle_pair() {
        let cleaned = clean(vec![
            raw("Ops", Some("40000")),
            raw("Ops", Some("60000")),
            raw("Ops", None),
        ])
        .unwrap();
        assert_eq!(cleaned[2].salary, 50_000.0);
    }

    #[test]
    fn department_without_any_parseable_salary_rejects_the_load() {
        let err = clean(vec![raw("Mystery", None), raw("Mystery", Some("n/a"))])
            .unwrap_err();
        assert_eq!(
            err,
            CleanError::EmptyDepartment {
                department: "Mystery".to_string()
            }
        );
    }

    #[test]
    fn salary_is_never_missing_after_cleaning() {
        let cleaned = clean(vec![
            raw("A", Some("10")),
            raw("A", None),
            raw("B", Some("xx")),
            raw("B", Some("70000")),
        ])
        .unwrap();
        assert!(cleaned.iter().all(|e| e.salary.is_finite()));
    }

    #[test]
    fn tenure_is_clamped_to_age_minus_18() {
        let mut row = raw("Sales", Some("1000"));
        row.age = 25;
        row.years_at_company = 10;
        let cleaned = clean(vec![row]).unwrap();

        assert_eq!(cleaned[0].years_at_company, 7);
        assert_eq!(cleaned[0].age_band, Some(AgeBand::Joven));
    }

    #[test]
    fn valid_tenure_is_left_untouched() {
        let mut row = raw("Sales", Some("1000"));
        row.age = 40;
        row.years_at_company = 22;
        let cleaned = clean(vec![row]).unwrap();
        assert_eq!(cleaned[0].years_at_company, 22);
    }

    #[test]
    fn tenure_invariant_holds_for_all_cleaned_records() {
        let rows = vec![
            {
                let mut r = raw("A", Some("10"));
                r.age = 19;
                r.years_at_company = 19;
                r
            },
            {
                let mut r = raw("A", Some("20"));
                r.age = 60;
                r.years_at_company = 41;
                r
            },
        ];
        for e in clean(rows).unwrap() {
            assert!(e.years_at_company <= e.age - 18);
        }
    }

    #[test]
    fn out_of_range_age_yields_no_band() {
        let mut row = raw("Sales", Some("1000"));
        row.age = 130;
        let cleaned = clean(vec![row]).unwrap();
        assert_eq!(cleaned[0].age_band, None);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean(vec![
            raw("  human resources ", Some("48000.5")),
            raw("Human Resources", None),
            {
                let mut r = raw("sales", Some("30000"));
                r.age = 25;
                r.years_at_company = 10;
                r
            },
        ])
        .unwrap();

        let as_raw: Vec<RawEmployee> = once
            .iter()
            .map(|e| RawEmployee {
                name: e.name.clone(),
                department: e.department.clone(),
                position: e.position.clone(),
                gender: e.gender.clone(),
                salary: Some(e.salary.to_string()),
                age: e.age,
                years_at_company: e.years_at_company,
                performance_score: e.performance_score,
            })
            .collect();

        let twice = clean(as_raw).unwrap();
        assert_eq!(once, twice);
    }
}
