/// Data layer: core types, loading, and the filter/aggregate pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, infer cell types
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  rename raw headers → stable names (fatal on mismatch)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  immutable snapshot: Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────────────┐
///   │ filter / aggregate / geo   │  derived read-only views per UI request
///   └───────────────────────────┘
/// ```
///
/// Every operation is stateless: the presentation layer calls in with the
/// current widget parameters and renders whatever view comes back.

pub mod aggregate;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod model;
pub mod schema;
