use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::trace;

use crate::config::StoreConfig;
use crate::declare_store_plugin;
use crate::errors::{Result, StatsError};
use crate::store::SortedAggregateStore;

declare_store_plugin!("memory", MemoryAggregateStore);

/// 单个有序集合
#[derive(Debug, Default)]
struct ZSetEntry {
    members: HashMap<String, f64>,
    expires_at: Option<DateTime<Utc>>,
}

impl ZSetEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// 进程内有序集合存储
///
/// 过期的 key 在下一次访问时惰性清除。
#[derive(Default, Clone)]
pub struct MemoryAggregateStore {
    inner: Arc<DashMap<String, ZSetEntry>>,
}

impl MemoryAggregateStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    pub async fn from_config(_config: &StoreConfig) -> Result<Self> {
        Ok(Self::new())
    }

    fn purge_expired(&self, key: &str) {
        let now = Utc::now();
        if self
            .inner
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            trace!("MemoryAggregateStore: purged expired key {}", key);
        }
    }

    /// member 当前分数
    pub fn score(&self, key: &str, member: &str) -> Option<f64> {
        self.purge_expired(key);
        self.inner
            .get(key)
            .and_then(|entry| entry.members.get(member).copied())
    }

    /// key 的过期时间点，未设置过期时返回 `None`
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.purge_expired(key);
        self.inner.get(key).and_then(|entry| entry.expires_at)
    }

    /// 按分数升序列出成员，分数相同按成员字典序
    pub fn members(&self, key: &str) -> Vec<(String, f64)> {
        self.purge_expired(key);
        let mut members: Vec<(String, f64)> = self
            .inner
            .get(key)
            .map(|entry| {
                entry
                    .members
                    .iter()
                    .map(|(m, s)| (m.clone(), *s))
                    .collect()
            })
            .unwrap_or_default();
        members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        members
    }

    /// 未过期的 key 数量
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.inner.retain(|_, entry| !entry.is_expired(now));
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SortedAggregateStore for MemoryAggregateStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        self.purge_expired(key);
        Ok(self.inner.contains_key(key))
    }

    async fn increment_score(&self, key: &str, member: &str, delta: f64) -> Result<()> {
        self.purge_expired(key);
        let mut entry = self.inner.entry(key.to_string()).or_default();
        *entry.members.entry(member.to_string()).or_insert(0.0) += delta;
        trace!("MemoryAggregateStore: ZINCRBY {} {} {}", key, delta, member);
        Ok(())
    }

    async fn set_score(&self, key: &str, member: &str, score: f64) -> Result<()> {
        self.purge_expired(key);
        self.inner
            .entry(key.to_string())
            .or_default()
            .members
            .insert(member.to_string(), score);
        trace!("MemoryAggregateStore: ZADD {} {} {}", key, score, member);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        self.purge_expired(key);
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| StatsError::store_operation(format!("Invalid TTL: {e}")))?;
        if let Some(mut entry) = self.inner.get_mut(key) {
            entry.expires_at = Some(Utc::now() + ttl);
            trace!("MemoryAggregateStore: EXPIRE {} {}s", key, ttl.num_seconds());
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
