/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///   sales.db (SQLite)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  SELECT * → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region / category / year equality → Subset
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌───────────┐      ┌──────────┐
///   │ aggregate  │      │  export   │  Subset → CSV bytes
///   └───────────┘      └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  KPIs + roll-ups for one render pass
///   └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
