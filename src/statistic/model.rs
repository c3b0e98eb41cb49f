use serde::{Deserialize, Serialize};

/// 一个层级下的一组菜单点击
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    /// 资源层级，缺失时校验为空
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub menus: Vec<MenuClick>,
}

impl ClickEvent {
    pub fn new<L: Into<String>>(level: L, menus: Vec<MenuClick>) -> Self {
        Self {
            level: Some(level.into()),
            menus,
        }
    }
}

/// 单个菜单的点击数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClick {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub count: Option<i64>,
}

impl MenuClick {
    pub fn new<C: Into<String>, N: Into<String>>(code: C, name: N, count: Option<i64>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            count,
        }
    }

    /// 缺失的 count 按 0 处理，负数原样保留
    pub fn effective_count(&self) -> i64 {
        self.count.unwrap_or(0)
    }
}
