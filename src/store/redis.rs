use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, RedisError, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::config::StoreConfig;
use crate::declare_store_plugin;
use crate::errors::{Result, StatsError};
use crate::store::SortedAggregateStore;

declare_store_plugin!("redis", RedisAggregateStore);

/// Redis 有序集合存储
///
/// EXISTS / ZINCRBY / ZADD / EXPIRE 各自是单条命令，不使用事务或脚本。
pub struct RedisAggregateStore {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    key_prefix: String,
}

impl RedisAggregateStore {
    /// 创建并用 PING 验证连接
    pub async fn from_config(config: &StoreConfig) -> Result<Self> {
        let redis_config = &config.redis;

        let client = redis::Client::open(redis_config.url.as_str()).map_err(|e| {
            StatsError::store_connection(format!(
                "Invalid Redis URL '{}': {}",
                redis_config.url, e
            ))
        })?;

        let store = Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            key_prefix: redis_config.key_prefix.clone(),
        };

        let mut conn = store.get_connection().await.map_err(|e| {
            error!(
                "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                e, redis_config.url
            );
            StatsError::store_connection(format!("Redis connection failed: {e}"))
        })?;
        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StatsError::store_connection(format!("Redis ping failed: {e}")))?;
        debug!(
            "RedisAggregateStore created with prefix: '{}', ping: {}",
            store.key_prefix, response
        );

        Ok(store)
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, RedisError> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免重复建连
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    async fn connection_or_fail(&self) -> Result<MultiplexedConnection> {
        match self.get_connection().await {
            Ok(conn) => Ok(conn),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    async fn fail<T>(&self, op: &str, key: &str, err: RedisError) -> Result<T> {
        error!("Redis {} on key '{}' failed: {}", op, key, err);
        self.reset_connection().await;
        Err(err.into())
    }
}

#[async_trait]
impl SortedAggregateStore for RedisAggregateStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let redis_key = self.make_key(key);
        let mut conn = self.connection_or_fail().await?;

        let result: redis::RedisResult<bool> = conn.exists(&redis_key).await;
        match result {
            Ok(exists) => {
                trace!("EXISTS {} -> {}", redis_key, exists);
                Ok(exists)
            }
            Err(e) => self.fail("EXISTS", &redis_key, e).await,
        }
    }

    async fn increment_score(&self, key: &str, member: &str, delta: f64) -> Result<()> {
        let redis_key = self.make_key(key);
        let mut conn = self.connection_or_fail().await?;

        let result: redis::RedisResult<f64> = conn.zincr(&redis_key, member, delta).await;
        match result {
            Ok(score) => {
                trace!("ZINCRBY {} {} {} -> {}", redis_key, delta, member, score);
                Ok(())
            }
            Err(e) => self.fail("ZINCRBY", &redis_key, e).await,
        }
    }

    async fn set_score(&self, key: &str, member: &str, score: f64) -> Result<()> {
        let redis_key = self.make_key(key);
        let mut conn = self.connection_or_fail().await?;

        let result: redis::RedisResult<i64> = conn.zadd(&redis_key, member, score).await;
        match result {
            Ok(added) => {
                trace!("ZADD {} {} {} -> {}", redis_key, score, member, added);
                Ok(())
            }
            Err(e) => self.fail("ZADD", &redis_key, e).await,
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        let redis_key = self.make_key(key);
        let seconds = i64::try_from(ttl.as_secs())
            .map_err(|_| StatsError::store_operation(format!("TTL too large: {ttl:?}")))?;
        let mut conn = self.connection_or_fail().await?;

        let result: redis::RedisResult<bool> = conn.expire(&redis_key, seconds).await;
        match result {
            Ok(applied) => {
                trace!("EXPIRE {} {} -> {}", redis_key, seconds, applied);
                Ok(())
            }
            Err(e) => self.fail("EXPIRE", &redis_key, e).await,
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedisConfig;

    fn local_config(prefix: &str) -> StoreConfig {
        StoreConfig {
            store_type: "redis".to_string(),
            redis: RedisConfig {
                url: std::env::var("MS_TEST_REDIS_URL")
                    .unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string()),
                key_prefix: prefix.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_connection_error() {
        let mut config = local_config("");
        config.redis.url = "not-a-redis-url".to_string();
        let err = RedisAggregateStore::from_config(&config).await.err().unwrap();
        assert!(matches!(err, StatsError::StoreConnection(_)));
    }

    #[tokio::test]
    #[ignore = "requires a running Redis server"]
    async fn test_zset_round_trip_against_server() {
        let prefix = format!("menu-stats-test:{}:", std::process::id());
        let store = RedisAggregateStore::from_config(&local_config(&prefix))
            .await
            .unwrap();

        let key = "2024-01-01:zSet:site";
        assert!(!store.exists(key).await.unwrap());
        store.set_score(key, "C1:N1", 5.0).await.unwrap();
        store
            .expire(key, Duration::from_secs(60))
            .await
            .unwrap();
        store.increment_score(key, "C1:N1", 5.0).await.unwrap();
        assert!(store.exists(key).await.unwrap());

        let mut conn = store.get_connection().await.unwrap();
        let full_key = store.make_key(key);
        let score: f64 = conn.zscore(&full_key, "C1:N1").await.unwrap();
        assert_eq!(score, 10.0);
        let ttl: i64 = conn.ttl(&full_key).await.unwrap();
        assert!(ttl > 0 && ttl <= 60);
        let _: i64 = conn.del(&full_key).await.unwrap();
    }
}
