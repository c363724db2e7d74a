/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PlayerTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  PlayerTable  │  Vec<Player>, unique-value sets
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply constraint set → surviving indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
