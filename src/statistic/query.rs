//! 菜单点击查询
//!
//! 校验层级后原样转发给调用统计服务，本地不做任何汇总。

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{Result, StatsError};
use crate::statistic::level::{LevelCatalog, assert_level};

/// 菜单点击对应的资源类型
pub const MENU_RESOURCE_KIND: &str = "menu";

/// 调用次数统计服务
#[async_trait]
pub trait InvokeCountQuery: Send + Sync {
    async fn query_invoke_count(
        &self,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        level: &str,
        resource_kind: &str,
        exclude: &HashSet<String>,
    ) -> Result<Map<String, Value>>;
}

#[derive(Clone)]
pub struct MenuClickQuery {
    catalog: Arc<dyn LevelCatalog>,
    query: Arc<dyn InvokeCountQuery>,
}

impl MenuClickQuery {
    pub fn new(catalog: Arc<dyn LevelCatalog>, query: Arc<dyn InvokeCountQuery>) -> Self {
        Self { catalog, query }
    }

    pub async fn query_menu_click(
        &self,
        begin_date: NaiveDate,
        end_date: NaiveDate,
        level: &str,
    ) -> Result<Map<String, Value>> {
        let level = assert_level(self.catalog.as_ref(), Some(level))?;
        debug!(
            "Querying menu clicks for level {} from {} to {}",
            level, begin_date, end_date
        );
        self.query
            .query_invoke_count(
                begin_date,
                end_date,
                level,
                MENU_RESOURCE_KIND,
                &HashSet::new(),
            )
            .await
    }
}

/// 解析查询日期，支持 YYYY-MM-DD 和 RFC3339
pub fn parse_query_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| {
            StatsError::date_parse(format!(
                "Invalid date format: '{}'. Supported formats: RFC3339 or YYYY-MM-DD",
                s
            ))
        })
}
