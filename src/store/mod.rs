//! 有序集合聚合存储
//!
//! 统计模块只依赖 [`SortedAggregateStore`] 的四个原子操作，
//! 具体后端通过插件注册表按名称选择。

pub mod macros;
pub mod memory;
#[cfg(feature = "redis-store")]
pub mod redis;
pub mod register;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::errors::{Result, StatsError};

pub use memory::MemoryAggregateStore;
#[cfg(feature = "redis-store")]
pub use self::redis::RedisAggregateStore;

/// 有序集合存储（member → score），带按 key 过期
///
/// 每个方法在存储端都应是单个原子操作；调用方不做额外加锁。
#[async_trait]
pub trait SortedAggregateStore: Send + Sync {
    /// key 是否存在（已过期视为不存在）
    async fn exists(&self, key: &str) -> Result<bool>;

    /// 在原有分数上累加，member 不存在时以 `delta` 创建
    async fn increment_score(&self, key: &str, member: &str, delta: f64) -> Result<()>;

    /// 直接设置分数（创建或覆盖）
    async fn set_score(&self, key: &str, member: &str, score: f64) -> Result<()>;

    /// 设置 key 的存活时间，key 不存在时无效果
    async fn expire(&self, key: &str, ttl: Duration) -> Result<()>;

    /// 后端名称（用于日志）
    fn backend_name(&self) -> &'static str;
}

/// 按配置创建存储后端
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn SortedAggregateStore>> {
    register::debug_store_registry();

    let ctor = register::get_store_plugin(&config.store_type).ok_or_else(|| {
        StatsError::store_plugin_not_found(format!(
            "Unknown store type: '{}'",
            config.store_type
        ))
    })?;

    debug!("Creating store backend: {}", config.store_type);
    let store = ctor(config.clone()).await?;
    info!("Using store backend: {}", store.backend_name());
    Ok(store)
}
