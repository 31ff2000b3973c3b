// ==========================================
// 生产偏差看板 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、校验
// 优先级: 显式路径 > DEVIATION_DASHBOARD_CONFIG > 用户配置目录 > 默认值
// ==========================================

use crate::config::dashboard_config::{DashboardConfig, MAX_LOOKBACK_DAYS, SUPPORTED_LOCALES};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    pub const CONFIG_PATH: &str = "DEVIATION_DASHBOARD_CONFIG";
    pub const LOCALE: &str = "DEVIATION_DASHBOARD_LOCALE";
    pub const LOOKBACK_DAYS: &str = "DEVIATION_DASHBOARD_LOOKBACK_DAYS";
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: DashboardConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（必须存在）
    ///
    /// # 说明
    /// 未显式指定时依次尝试环境变量、用户配置目录；都不存在则使用默认值。
    /// 最后应用环境变量覆写并校验。
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let source = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()));
                }
                Some(path.to_path_buf())
            }
            None => Self::discover_path(),
        };

        let mut config = match &source {
            Some(path) => Self::read_file(path)?,
            None => DashboardConfig::default(),
        };

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        Self::validate(&config)?;

        debug!(
            source = ?source,
            locale = %config.locale,
            lookback_days = config.lookback_days,
            "配置加载完成"
        );

        Ok(Self { config, source })
    }

    /// 从已有配置创建（测试 / 嵌入使用）
    pub fn from_config(config: DashboardConfig) -> ConfigResult<Self> {
        Self::validate(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn into_config(self) -> DashboardConfig {
        self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 默认配置文件路径: <config_dir>/deviation-dashboard/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deviation-dashboard").join("config.json"))
    }

    fn discover_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(env_keys::CONFIG_PATH) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        Self::default_config_path().filter(|p| p.exists())
    }

    /// 读取 JSON 配置文件
    pub fn read_file(path: &Path) -> ConfigResult<DashboardConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "解析配置文件");
        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写
    ///
    /// lookup 注入便于测试，生产使用 std::env::var
    pub fn apply_env_overrides<F>(config: &mut DashboardConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(env_keys::LOCALE) {
            let trimmed = locale.trim();
            if !trimmed.is_empty() {
                config.locale = trimmed.to_string();
            }
        }

        if let Some(days) = lookup(env_keys::LOOKBACK_DAYS) {
            config.lookback_days =
                days.trim()
                    .parse::<i64>()
                    .map_err(|e| ConfigError::ConfigValueError {
                        key: env_keys::LOOKBACK_DAYS.to_string(),
                        value: days.clone(),
                        message: e.to_string(),
                    })?;
        }

        Ok(())
    }

    /// 校验配置
    pub fn validate(config: &DashboardConfig) -> ConfigResult<()> {
        if !SUPPORTED_LOCALES.contains(&config.locale.as_str()) {
            return Err(ConfigError::ConfigValueError {
                key: "locale".to_string(),
                value: config.locale.clone(),
                message: format!("仅支持 {}", SUPPORTED_LOCALES.join(" / ")),
            });
        }

        if config.lookback_days < 0 {
            return Err(ConfigError::ConfigValueError {
                key: "lookback_days".to_string(),
                value: config.lookback_days.to_string(),
                message: "不能为负数".to_string(),
            });
        }

        if config.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::ConfigValueError {
                key: "lookback_days".to_string(),
                value: config.lookback_days.to_string(),
                message: format!("不能超过 {}", MAX_LOOKBACK_DAYS),
            });
        }

        let t = config.deviation_thresholds;
        if !(t.medium_from.is_finite() && t.high_from.is_finite()) || t.medium_from >= t.high_from {
            return Err(ConfigError::ConfigValueError {
                key: "deviation_thresholds".to_string(),
                value: format!("{} / {}", t.medium_from, t.high_from),
                message: "medium_from 必须小于 high_from".to_string(),
            });
        }

        if config.detail_page_size == 0 {
            return Err(ConfigError::ConfigValueError {
                key: "detail_page_size".to_string(),
                value: "0".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::dashboard_config::LogFormat;
    use crate::domain::types::{RoundingMode, ZeroPlannedPolicy};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(ConfigManager::validate(&config).is_ok());
        assert_eq!(config.lookback_days, 90);
        assert_eq!(config.detail_page_size, 10);
        assert_eq!(config.rounding_mode, RoundingMode::HalfEven);
    }

    #[test]
    fn test_load_partial_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"locale": "en", "zero_planned_policy": "SKIP_ROW", "logging": {{"format": "json"}}}}"#
        )
        .unwrap();

        let manager = ConfigManager::load(Some(file.path())).unwrap();
        let config = manager.config();

        assert_eq!(config.locale, "en");
        assert_eq!(config.zero_planned_policy, ZeroPlannedPolicy::SkipRow);
        assert_eq!(config.logging.format, LogFormat::Json);
        // 未指定键取默认值
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.deviation_thresholds.high_from, 50.0);
        assert_eq!(manager.source(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = ConfigManager::load(Some(Path::new("/no/such/config.json")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (env_keys::LOCALE, "zh-CN"),
            (env_keys::LOOKBACK_DAYS, "30"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        ConfigManager::apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.locale, "zh-CN");
        assert_eq!(config.lookback_days, 30);
    }

    #[test]
    fn test_env_override_invalid_number() {
        let mut config = DashboardConfig::default();
        let result = ConfigManager::apply_env_overrides(&mut config, |k| {
            (k == env_keys::LOOKBACK_DAYS).then(|| "ninety".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ConfigValueError { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DashboardConfig::default();
        config.locale = "de".to_string();
        assert!(ConfigManager::validate(&config).is_err());

        let mut config = DashboardConfig::default();
        config.deviation_thresholds.medium_from = 60.0;
        assert!(ConfigManager::validate(&config).is_err());

        let mut config = DashboardConfig::default();
        config.detail_page_size = 0;
        assert!(ConfigManager::from_config(config).is_err());
    }

    #[test]
    fn test_validate_lookback_days_bounds() {
        let mut config = DashboardConfig::default();
        config.lookback_days = MAX_LOOKBACK_DAYS;
        assert!(ConfigManager::validate(&config).is_ok());

        config.lookback_days = 1_000_000_000_000;
        match ConfigManager::validate(&config) {
            Err(ConfigError::ConfigValueError { key, .. }) => assert_eq!(key, "lookback_days"),
            other => panic!("Expected ConfigValueError, got {:?}", other),
        }

        config.lookback_days = -1;
        assert!(ConfigManager::validate(&config).is_err());
    }

    #[test]
    fn test_env_override_huge_lookback_rejected() {
        let mut config = DashboardConfig::default();
        ConfigManager::apply_env_overrides(&mut config, |k| {
            (k == env_keys::LOOKBACK_DAYS).then(|| "999999999999".to_string())
        })
        .unwrap();
        assert!(ConfigManager::validate(&config).is_err());
    }
}
