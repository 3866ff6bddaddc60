//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() / error_type() / message()
/// - 便捷构造函数（snake_case）
macro_rules! define_tesdb_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TesdbError {
            $($variant(String),)*
        }

        impl TesdbError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TesdbError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TesdbError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TesdbError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl TesdbError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TesdbError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tesdb_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Mail("E013", "Mail Delivery Error"),
}

impl TesdbError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 将数据库错误归类：唯一约束冲突 -> Conflict，外键约束 -> Validation
    pub fn from_db(context: &str, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                TesdbError::conflict(format!("{context}: {detail}"))
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                TesdbError::validation(format!("{context}: referenced record missing ({detail})"))
            }
            _ => TesdbError::database_operation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for TesdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TesdbError {}

impl From<sea_orm::DbErr> for TesdbError {
    fn from(err: sea_orm::DbErr) -> Self {
        TesdbError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TesdbError {
    fn from(err: std::io::Error) -> Self {
        TesdbError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TesdbError {
    fn from(err: serde_json::Error) -> Self {
        TesdbError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TesdbError {
    fn from(err: chrono::ParseError) -> Self {
        TesdbError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TesdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TesdbError::cache_connection("test").code(), "E001");
        assert_eq!(TesdbError::validation("test").code(), "E006");
        assert_eq!(TesdbError::conflict("test").code(), "E008");
        assert_eq!(TesdbError::authentication("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TesdbError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            TesdbError::mail("smtp down").error_type(),
            "Mail Delivery Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = TesdbError::validation("End Time must be later than Start Time.");
        assert_eq!(err.message(), "End Time must be later than Start Time.");
    }

    #[test]
    fn test_format_simple() {
        let err = TesdbError::conflict("Batch name already used");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("Batch name already used"));
    }

    #[test]
    fn test_plain_db_error_is_operation_error() {
        let err = TesdbError::from_db("load staff", sea_orm::DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E004");
        assert!(err.message().starts_with("load staff"));
    }
}
