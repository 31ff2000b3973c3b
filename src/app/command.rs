// ==========================================
// 生产偏差看板 - 终端命令解析
// ==========================================
// 职责: 终端输入行 → Command → UiEvent
// 行号: 终端展示从 1 开始，UiEvent 使用 0 起下标
// ==========================================

use crate::api::validator::{parse_date, parse_scope};
use crate::api::{ApiError, ApiResult};
use crate::app::state::UiEvent;

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 触发状态变更的命令
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

/// 解析一行输入
///
/// 空行视为 `show`
pub fn parse_command(line: &str) -> ApiResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Show);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "unit" => Ok(Command::Event(UiEvent::BusinessUnitChanged(parse_scope(
            "business_unit",
            rest,
        )?))),
        "group" => Ok(Command::Event(UiEvent::ProductGroupChanged(parse_scope(
            "product_group",
            rest,
        )?))),
        "range" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(start), Some(end), None) => Ok(Command::Event(UiEvent::DateRangeChanged {
                    start: parse_date("start_date", start)?,
                    end: parse_date("end_date", end)?,
                })),
                _ => Err(ApiError::InvalidInput(
                    "用法: range <START> <END>".to_string(),
                )),
            }
        }
        "select" => {
            let row = parse_positive("row", rest)?;
            Ok(Command::Event(UiEvent::RowSelected(row - 1)))
        }
        "page" => Ok(Command::Event(UiEvent::DetailPageChanged(parse_positive(
            "page", rest,
        )?))),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(ApiError::InvalidInput(format!("未知命令: {}", other))),
    }
}

fn parse_positive(field: &str, value: &str) -> ApiResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ApiError::InvalidInput(format!(
            "{} 必须为正整数: '{}'",
            field, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Scope;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_command("unit Plant A").unwrap(),
            Command::Event(UiEvent::BusinessUnitChanged(Scope::Only("Plant A".into())))
        );
        assert_eq!(
            parse_command("group Tümü").unwrap(),
            Command::Event(UiEvent::ProductGroupChanged(Scope::All))
        );
        assert_eq!(
            parse_command("range 2024-01-01 2024-01-31").unwrap(),
            Command::Event(UiEvent::DateRangeChanged {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            })
        );
    }

    #[test]
    fn test_select_is_one_based() {
        assert_eq!(
            parse_command("select 1").unwrap(),
            Command::Event(UiEvent::RowSelected(0))
        );
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("select x").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse_command("").unwrap(), Command::Show);
        assert_eq!(parse_command("HELP").unwrap(), Command::Help);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert!(matches!(
            parse_command("dance"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(parse_command("range 2024-01-01").is_err());
        assert!(parse_command("unit").is_err());
    }
}
