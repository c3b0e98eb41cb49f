//! 菜单点击统计
//!
//! - `model`: 点击批次数据结构
//! - `level`: 资源层级校验
//! - `keys`: 有序集合 key / member 编码
//! - `aggregator`: 写入路径，按天按层级累加点击数
//! - `query`: 读取路径，转发给调用统计服务
//! - `service`: 对外统一入口

pub mod aggregator;
pub mod keys;
pub mod level;
pub mod model;
pub mod query;
pub mod service;

pub use aggregator::MenuClickAggregator;
pub use keys::{AggregateKey, MENU_CLICK_TTL_DAYS, ZSET_NAMESPACE, menu_click_ttl, menu_member};
pub use level::{FixedLevelCatalog, LevelCatalog, ResourceLevel, ResourceLevelCatalog};
pub use model::{ClickEvent, MenuClick};
pub use query::{InvokeCountQuery, MENU_RESOURCE_KIND, MenuClickQuery, parse_query_date};
pub use service::StatisticService;
