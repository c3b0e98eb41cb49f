//! 有序集合 key 与 member 编码
//!
//! - key: `<yyyy-MM-dd>:zSet:<level>`
//! - member: `<code>:<name>`
//!
//! 字段内的 `:` 不做转义，包含分隔符的 code/name 可能与其他组合产生相同 member。

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

pub const KEY_SEPARATOR: char = ':';
pub const ZSET_NAMESPACE: &str = "zSet";
/// 新建 key 的保留天数
pub const MENU_CLICK_TTL_DAYS: u64 = 31;

pub fn menu_click_ttl() -> Duration {
    Duration::from_secs(MENU_CLICK_TTL_DAYS * 24 * 60 * 60)
}

/// 一天一个层级的聚合 key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregateKey<'a> {
    pub date: NaiveDate,
    pub namespace: &'a str,
    pub level: &'a str,
}

impl<'a> AggregateKey<'a> {
    /// 菜单点击使用的 key
    pub fn menu_click(date: NaiveDate, level: &'a str) -> Self {
        Self {
            date,
            namespace: ZSET_NAMESPACE,
            level,
        }
    }
}

impl fmt::Display for AggregateKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.date.format("%Y-%m-%d"),
            self.namespace,
            self.level,
            sep = KEY_SEPARATOR
        )
    }
}

/// 有序集合中的 member
pub fn menu_member(code: &str, name: &str) -> String {
    format!("{code}{KEY_SEPARATOR}{name}")
}
