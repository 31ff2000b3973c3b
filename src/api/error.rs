// ==========================================
// 生产偏差看板 - API层错误类型
// ==========================================
// 职责: 边界校验错误 + 下层错误汇总
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 边界校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("日期格式错误 ({field}): {value}，期望 YYYY-MM-DD")]
    InvalidDate { field: String, value: String },

    #[error("行号超出范围: row={row}, 当前表格共 {len} 行")]
    RowOutOfRange { row: usize, len: usize },

    #[error("无效的状态转换: {0}")]
    InvalidStateTransition(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("数据导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_conversion() {
        let import_err = ImportError::DivisionByZero {
            row: 3,
            product_name: "P1".to_string(),
        };
        let api_err: ApiError = import_err.into();
        match api_err {
            ApiError::Import(inner) => assert!(inner.to_string().contains("P1")),
            _ => panic!("Expected Import"),
        }
    }

    #[test]
    fn test_error_messages_are_explicit() {
        let err = ApiError::RowOutOfRange { row: 9, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains("row=9"));
        assert!(msg.contains('3'));
    }
}
