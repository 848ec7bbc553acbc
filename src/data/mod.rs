/// Data layer: core types, loading, coercion and row filtering.
///
/// Architecture:
/// ```text
///  .csv / .txt (tab, Windows-1252)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table, infer one type per column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  header + Vec<Vec<Value>>
///   └──────────┘
///        │
///        ├──▶ numeric  tolerant / strict column coercion
///        └──▶ filter   equality predicates, dedup, drop incomplete rows
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod numeric;
