/// Data layer: core types, loading, cleaning, filtering, and aggregates.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawEmployee>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  normalize, impute, clamp → Vec<Employee>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │EmployeeDataset│  immutable roster + extents
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ──► │  stats    │  indices → display aggregates
///   └──────────┘     └──────────┘
/// ```
pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
