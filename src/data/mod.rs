/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CorrelationDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │ CorrelationDataset  │  Vec<EdgeRecord>, category index
///   └────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  significance/strength/category predicates
///   └──────────┘   → Vec<FilteredEdge> → Vec<NodeRecord>
/// ```
pub mod filter;
pub mod loader;
pub mod model;
