//! menu-stats - Daily menu click aggregation
//!
//! Receives batches of navigation click events, validates their resource
//! level, and accumulates per-day, per-level click counts in a sorted set
//! that expires 31 days after it is created.
//!
//! # Features
//! - **redis-store**: Redis sorted-set backend (default)
//!
//! # Architecture
//! - `statistic`: Click aggregation (write path) and query façade (read path)
//! - `store`: Sorted aggregate store trait and backends (memory, Redis)
//! - `config`: Configuration management
//! - `system`: Logging initialization
//! - `errors`: Error type and codes

pub mod config;
pub mod errors;
pub mod statistic;
pub mod store;
pub mod system;

pub use errors::{Result, StatsError};
pub use statistic::{ClickEvent, MenuClick, StatisticService};
