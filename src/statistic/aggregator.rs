//! 菜单点击写入
//!
//! 每次调用：
//! 1. 先校验整个批次的层级，任一失败则不写入
//! 2. 固定一次"今天"，按层级分组得到 key
//! 3. 每个 key 只探测一次是否存在：
//!    - 已存在：逐个 member 累加
//!    - 不存在：逐个 member 设值，然后设置 31 天过期
//!
//! 并发的两次首写可能都走到"不存在"分支，相同 member 的分数会互相覆盖，
//! 过期时间也会被设置两次。统计数据是近似值，这里不加锁。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, trace, warn};

use crate::errors::Result;
use crate::statistic::keys::{AggregateKey, menu_click_ttl, menu_member};
use crate::statistic::level::{LevelCatalog, assert_level};
use crate::statistic::model::ClickEvent;
use crate::store::SortedAggregateStore;

/// 同一个 key 下待写入的 member，保持首次出现的顺序
///
/// 合并后的分数按 f64 累加，与存储端 ZINCRBY 的语义一致，不会溢出。
struct KeyBatch {
    key: String,
    members: Vec<(String, f64)>,
    positions: HashMap<String, usize>,
}

impl KeyBatch {
    fn new(key: String) -> Self {
        Self {
            key,
            members: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// 重复的 member 在本地先合并
    fn add(&mut self, member: String, count: i64) {
        let count = count as f64;
        match self.positions.get(&member) {
            Some(&idx) => self.members[idx].1 += count,
            None => {
                self.positions.insert(member.clone(), self.members.len());
                self.members.push((member, count));
            }
        }
    }
}

#[derive(Clone)]
pub struct MenuClickAggregator {
    store: Arc<dyn SortedAggregateStore>,
    catalog: Arc<dyn LevelCatalog>,
}

impl MenuClickAggregator {
    pub fn new(store: Arc<dyn SortedAggregateStore>, catalog: Arc<dyn LevelCatalog>) -> Self {
        Self { store, catalog }
    }

    /// 以本地当前日期写入一批点击
    pub async fn save_menu_click(&self, batch: &[ClickEvent]) -> Result<()> {
        let today = Local::now().date_naive();
        self.save_menu_click_on(today, batch).await
    }

    /// 以指定日期写入一批点击
    pub async fn save_menu_click_on(&self, date: NaiveDate, batch: &[ClickEvent]) -> Result<()> {
        let levels = batch
            .iter()
            .map(|event| assert_level(self.catalog.as_ref(), event.level.as_deref()))
            .collect::<Result<Vec<&str>>>()?;

        let key_batches = Self::group_by_key(date, batch, &levels);
        debug!(
            "Saving {} menu click events into {} keys for {}",
            batch.len(),
            key_batches.len(),
            date
        );

        for key_batch in &key_batches {
            self.write_key(key_batch).await?;
        }

        Ok(())
    }

    fn group_by_key(date: NaiveDate, batch: &[ClickEvent], levels: &[&str]) -> Vec<KeyBatch> {
        let mut key_batches: Vec<KeyBatch> = Vec::new();
        let mut by_level: HashMap<&str, usize> = HashMap::new();

        for (event, &level) in batch.iter().zip(levels) {
            let idx = *by_level.entry(level).or_insert_with(|| {
                let key = AggregateKey::menu_click(date, level).to_string();
                key_batches.push(KeyBatch::new(key));
                key_batches.len() - 1
            });
            let key_batch = &mut key_batches[idx];
            for menu in &event.menus {
                key_batch.add(menu_member(&menu.code, &menu.name), menu.effective_count());
            }
        }

        key_batches
    }

    async fn write_key(&self, key_batch: &KeyBatch) -> Result<()> {
        let key = key_batch.key.as_str();

        if self.store.exists(key).await? {
            trace!(
                "Key {} exists, incrementing {} members",
                key,
                key_batch.members.len()
            );
            for (member, count) in &key_batch.members {
                self.store.increment_score(key, member, *count).await?;
            }
        } else {
            trace!(
                "Key {} is new, setting {} members",
                key,
                key_batch.members.len()
            );
            if let Err(err) = self.set_members(key_batch).await {
                // 部分 member 已写入时仍尝试设置过期，否则该 key 之后只会走累加分支且永不过期
                if let Err(expire_err) = self.store.expire(key, menu_click_ttl()).await {
                    warn!("Failed to expire partially written key {}: {}", key, expire_err);
                }
                return Err(err);
            }
            self.store.expire(key, menu_click_ttl()).await?;
        }

        Ok(())
    }

    async fn set_members(&self, key_batch: &KeyBatch) -> Result<()> {
        for (member, count) in &key_batch.members {
            self.store.set_score(&key_batch.key, member, *count).await?;
        }
        Ok(())
    }
}
