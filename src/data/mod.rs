/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   data/iris.csv (embedded)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse once → Arc<Dataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  species ∧ inclusive range → FilteredView
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary  │   │  export  │  metrics / describe, CSV out
///   └──────────┘   └──────────┘
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
