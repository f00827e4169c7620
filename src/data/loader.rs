use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::clean::clean;
use super::model::{EmployeeDataset, RawEmployee};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an employee roster from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the roster columns (see below)
/// * `.json` – records-oriented array, `[{ "Name": ..., "Salary": ... }]`
///
/// The raw rows are run through the cleaning pipeline before the dataset
/// is handed back; a roster the pipeline rejects fails the whole load.
pub fn load_file(path: &Path) -> Result<EmployeeDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let bytes = std::fs::read(path).context("reading roster file")?;
    let fingerprint = fingerprint(&bytes);

    let raw = match ext.as_str() {
        "csv" => parse_csv(bytes.as_slice())?,
        "json" => {
            let text = String::from_utf8(bytes).context("roster file is not valid UTF-8")?;
            parse_json(&text)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    let employees = clean(raw).context("cleaning roster")?;
    Ok(EmployeeDataset::from_employees(employees, fingerprint))
}

/// Content hash of the source bytes, the dataset's cache key.
fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

const COL_NAME: &str = "Name";
const COL_DEPARTMENT: &str = "Department";
const COL_POSITION: &str = "Position";
const COL_GENDER: &str = "Gender";
const COL_SALARY: &str = "Salary";
const COL_AGE: &str = "Age";
const COL_YEARS: &str = "YearsAtCompany";
const COL_PERFORMANCE: &str = "PerformanceScore";

/// Parse a CSV roster: header row naming at least the eight roster
/// columns, one row per employee, UTF-8.
///
/// Salary cells are carried as raw text (the cleaning pipeline owns their
/// coercion); the other numeric columns are strict-parsed here and a
/// malformed value fails the load with the offending row in the message.
pub fn parse_csv<R: Read>(input: R) -> Result<Vec<RawEmployee>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };

    let name_idx = col(COL_NAME)?;
    let dept_idx = col(COL_DEPARTMENT)?;
    let pos_idx = col(COL_POSITION)?;
    let gender_idx = col(COL_GENDER)?;
    let salary_idx = col(COL_SALARY)?;
    let age_idx = col(COL_AGE)?;
    let years_idx = col(COL_YEARS)?;
    let perf_idx = col(COL_PERFORMANCE)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        rows.push(RawEmployee {
            name: optional_text(cell(name_idx)),
            department: cell(dept_idx).to_string(),
            position: cell(pos_idx).to_string(),
            gender: optional_text(cell(gender_idx)),
            salary: optional_text(cell(salary_idx)),
            age: parse_integer(cell(age_idx), row_no, COL_AGE)?,
            years_at_company: parse_integer(cell(years_idx), row_no, COL_YEARS)?,
            performance_score: parse_integer(cell(perf_idx), row_no, COL_PERFORMANCE)?,
        });
    }
    Ok(rows)
}

/// Blank cells become `None` rather than empty strings.
fn optional_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn parse_integer(s: &str, row: usize, col: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not an integer"))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON roster (the default
/// `df.to_json(orient='records')` shape):
///
/// ```json
/// [
///   {
///     "Name": "John Smith",
///     "Department": " engineering ",
///     "Position": "developer",
///     "Gender": "Male",
///     "Salary": 52000,
///     "Age": 31,
///     "YearsAtCompany": 4,
///     "PerformanceScore": 3
///   },
///   ...
/// ]
/// ```
///
/// `Salary` may be a number, a string, or null; the other numeric fields
/// must be integers.
pub fn parse_json(text: &str) -> Result<Vec<RawEmployee>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        rows.push(RawEmployee {
            name: json_text(obj.get(COL_NAME)),
            department: json_text(obj.get(COL_DEPARTMENT)).unwrap_or_default(),
            position: json_text(obj.get(COL_POSITION)).unwrap_or_default(),
            gender: json_text(obj.get(COL_GENDER)),
            salary: json_salary(obj.get(COL_SALARY)),
            age: json_integer(obj.get(COL_AGE), i, COL_AGE)?,
            years_at_company: json_integer(obj.get(COL_YEARS), i, COL_YEARS)?,
            performance_score: json_integer(obj.get(COL_PERFORMANCE), i, COL_PERFORMANCE)?,
        });
    }
    Ok(rows)
}

fn json_text(val: Option<&JsonValue>) -> Option<String> {
    val.and_then(|v| v.as_str())
        .and_then(|s| optional_text(s))
}

/// Salary survives as raw text whatever the JSON type; coercion is the
/// cleaning pipeline's job.
fn json_salary(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::String(s) => optional_text(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_integer(val: Option<&JsonValue>, row: usize, col: &str) -> Result<i64> {
    val.and_then(|v| v.as_i64())
        .with_context(|| format!("Row {row}, {col}: missing or not an integer"))
}
