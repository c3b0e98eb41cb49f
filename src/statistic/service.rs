//! Statistic service layer
//!
//! Bundles the write path and the read path over one level catalog.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::statistic::aggregator::MenuClickAggregator;
use crate::statistic::level::{LevelCatalog, ResourceLevelCatalog};
use crate::statistic::model::ClickEvent;
use crate::statistic::query::{InvokeCountQuery, MenuClickQuery};
use crate::store::{SortedAggregateStore, create_store};

#[derive(Clone)]
pub struct StatisticService {
    aggregator: MenuClickAggregator,
    query: MenuClickQuery,
}

impl StatisticService {
    /// 使用默认资源层级
    pub fn new(store: Arc<dyn SortedAggregateStore>, query: Arc<dyn InvokeCountQuery>) -> Self {
        Self::with_catalog(store, Arc::new(ResourceLevelCatalog), query)
    }

    pub fn with_catalog(
        store: Arc<dyn SortedAggregateStore>,
        catalog: Arc<dyn LevelCatalog>,
        query: Arc<dyn InvokeCountQuery>,
    ) -> Self {
        Self {
            aggregator: MenuClickAggregator::new(store, catalog.clone()),
            query: MenuClickQuery::new(catalog, query),
        }
    }

    /// 按配置选择存储后端
    pub async fn from_config(
        config: &StoreConfig,
        query: Arc<dyn InvokeCountQuery>,
    ) -> Result<Self> {
        let store = create_store(config).await?;
        Ok(Self::new(store, query))
    }

    pub async fn save_menu_click(&self, batch: &[ClickEvent]) -> Result<()> {
        self.aggregator.save_menu_click(batch).await
    }

    pub async fn query_menu_click(
        &self,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        level: &str,
    ) -> Result<Map<String, Value>> {
        self.query
            .query_menu_click(begin_date, end_date, level)
            .await
    }
}
