//! 资源层级校验
//!
//! [`check_level`] 是纯函数；[`assert_level`] 在其外包一层告警日志，
//! 仅对非空但未知的层级输出 warn。

use std::collections::HashSet;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::warn;

use crate::errors::{Result, StatsError};

/// 已知资源层级
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, IntoStaticStr, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceLevel {
    Site,
    Organization,
    Project,
    User,
}

impl ResourceLevel {
    /// 所有层级的标签
    pub fn tags() -> Vec<&'static str> {
        Self::iter().map(|level| level.into()).collect()
    }
}

/// 只读的层级集合
pub trait LevelCatalog: Send + Sync {
    fn contains(&self, tag: &str) -> bool;
}

/// 由 [`ResourceLevel`] 枚举提供的默认集合
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceLevelCatalog;

impl LevelCatalog for ResourceLevelCatalog {
    fn contains(&self, tag: &str) -> bool {
        ResourceLevel::from_str(tag).is_ok()
    }
}

/// 自定义层级集合
#[derive(Debug, Clone, Default)]
pub struct FixedLevelCatalog {
    levels: HashSet<String>,
}

impl FixedLevelCatalog {
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }
}

impl LevelCatalog for FixedLevelCatalog {
    fn contains(&self, tag: &str) -> bool {
        self.levels.contains(tag)
    }
}

/// 校验层级，成功时返回层级本身
pub fn check_level<'a>(catalog: &dyn LevelCatalog, level: Option<&'a str>) -> Result<&'a str> {
    match level {
        None | Some("") => Err(StatsError::EmptyLevel),
        Some(tag) if catalog.contains(tag) => Ok(tag),
        Some(tag) => Err(StatsError::invalid_level(tag)),
    }
}

/// 同 [`check_level`]，非法层级额外记录 warn 日志
pub fn assert_level<'a>(catalog: &dyn LevelCatalog, level: Option<&'a str>) -> Result<&'a str> {
    check_level(catalog, level).inspect_err(|err| {
        if let StatsError::InvalidLevel(tag) = err {
            warn!("menu level validation failed: {}", tag);
        }
    })
}
