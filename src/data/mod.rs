/// Data layer: core types, loading, caching, filtering and aggregation helpers.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  Arc<Dataset>, reloaded after the TTL window
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  country / gender / age predicates → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  running means, rounding
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
