/// Chart layer: request → specification → plot-ready data.
///
/// ```text
///   ChartRequest (kind + selected columns)
///        │
///        ▼
///   ┌──────────┐
///   │   spec    │  validate columns against classification, bind axes, title
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  bins / box summaries / points / counts
///   └──────────┘
/// ```

pub mod series;
pub mod spec;
pub mod title;
