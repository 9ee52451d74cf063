/// Data layer: core types, loading, and column classification.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (kind tagged per column)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Column>, immutable after load
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  categorical / numerical column names
///   └──────────┘
/// ```

pub mod classify;
pub mod loader;
pub mod model;
