use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// level 为空或缺失
    EmptyLevel,
    /// level 不在已知资源层级中
    InvalidLevel(String),
    StoreConnection(String),
    StoreOperation(String),
    StorePluginNotFound(String),
    QueryFailed(String),
    DateParse(String),
    Config(String),
}

impl StatsError {
    /// 获取错误代码（供上层做国际化）
    pub fn code(&self) -> &'static str {
        match self {
            StatsError::EmptyLevel => "error.menuClick.level.empty",
            StatsError::InvalidLevel(_) => "error.menuClick.illegal.level",
            StatsError::StoreConnection(_) => "error.menuClick.store.connection",
            StatsError::StoreOperation(_) => "error.menuClick.store.operation",
            StatsError::StorePluginNotFound(_) => "error.menuClick.store.plugin.notFound",
            StatsError::QueryFailed(_) => "error.menuClick.query.failed",
            StatsError::DateParse(_) => "error.menuClick.date.illegal",
            StatsError::Config(_) => "error.menuClick.config",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            StatsError::EmptyLevel => "Empty Level",
            StatsError::InvalidLevel(_) => "Invalid Level",
            StatsError::StoreConnection(_) => "Store Connection Error",
            StatsError::StoreOperation(_) => "Store Operation Error",
            StatsError::StorePluginNotFound(_) => "Store Plugin Not Found",
            StatsError::QueryFailed(_) => "Query Failed",
            StatsError::DateParse(_) => "Date Parse Error",
            StatsError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            StatsError::EmptyLevel => "menu click level is empty",
            StatsError::InvalidLevel(level) => level,
            StatsError::StoreConnection(msg)
            | StatsError::StoreOperation(msg)
            | StatsError::StorePluginNotFound(msg)
            | StatsError::QueryFailed(msg)
            | StatsError::DateParse(msg)
            | StatsError::Config(msg) => msg,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for StatsError {}

// 便捷的构造函数
impl StatsError {
    pub fn invalid_level<T: Into<String>>(level: T) -> Self {
        StatsError::InvalidLevel(level.into())
    }

    pub fn store_connection<T: Into<String>>(msg: T) -> Self {
        StatsError::StoreConnection(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        StatsError::StoreOperation(msg.into())
    }

    pub fn store_plugin_not_found<T: Into<String>>(msg: T) -> Self {
        StatsError::StorePluginNotFound(msg.into())
    }

    pub fn query_failed<T: Into<String>>(msg: T) -> Self {
        StatsError::QueryFailed(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        StatsError::DateParse(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        StatsError::Config(msg.into())
    }
}

#[cfg(feature = "redis-store")]
impl From<redis::RedisError> for StatsError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout() {
            StatsError::StoreConnection(err.to_string())
        } else {
            StatsError::StoreOperation(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::QueryFailed(err.to_string())
    }
}

impl From<chrono::ParseError> for StatsError {
    fn from(err: chrono::ParseError) -> Self {
        StatsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_error_codes() {
        assert_eq!(StatsError::EmptyLevel.code(), "error.menuClick.level.empty");
        assert_eq!(
            StatsError::invalid_level("galaxy").code(),
            "error.menuClick.illegal.level"
        );
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = StatsError::store_operation("WRONGTYPE");
        assert_eq!(err.to_string(), "Store Operation Error: WRONGTYPE");
    }

    #[test]
    fn test_chrono_parse_error_maps_to_date_parse() {
        let err: StatsError = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert!(matches!(err, StatsError::DateParse(_)));
    }
}
