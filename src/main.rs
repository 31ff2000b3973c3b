// ==========================================
// 生产偏差看板 - 终端主入口
// ==========================================
// 流程: 参数解析 → 配置加载 → 日志初始化 → 数据集加载 → 命令循环
// ==========================================

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use deviation_dashboard::api::validator::parse_date;
use deviation_dashboard::app::{parse_command, render_dashboard, AppState, Command, Labels};
use deviation_dashboard::config::{ConfigManager, SUPPORTED_LOCALES};
use deviation_dashboard::i18n::{set_locale, t, t_with_args};
use deviation_dashboard::{logging, DashboardApi, DatasetPreparer, APP_NAME, VERSION};

/// 命令提示符
const PROMPT: &str = "> ";

/// 生产偏差看板: 计划量 vs 实际量偏差分析
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// 订单表格文件（.xlsx / .xls / .csv）
    file: PathBuf,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 界面语言（tr / en / zh-CN）
    #[arg(short, long)]
    locale: Option<String>,

    /// 起始日期（默认 今天 - lookback_days）
    #[arg(long)]
    start: Option<String>,

    /// 结束日期（默认 今天）
    #[arg(long)]
    end: Option<String>,

    /// 渲染一次后退出
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    let config_source = manager
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "默认值".to_string());
    let mut config = manager.into_config();
    if let Some(locale) = cli.locale {
        if !SUPPORTED_LOCALES.contains(&locale.as_str()) {
            anyhow::bail!(
                "不支持的语言: {} (可选: {})",
                locale,
                SUPPORTED_LOCALES.join(", ")
            );
        }
        config.locale = locale;
    }

    logging::init(&config.logging);
    set_locale(&config.locale);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");
    tracing::info!(
        source = %config_source,
        locale = %config.locale,
        lookback_days = config.lookback_days,
        "配置加载完成"
    );

    let preparer = DatasetPreparer::new(config.rounding_mode, config.zero_planned_policy);
    let (dataset, report) = preparer
        .load_file(&cli.file)
        .with_context(|| format!("加载数据文件失败: {}", cli.file.display()))?;
    for skipped in &report.skipped {
        tracing::warn!(row = skipped.row_number, reason = %skipped.reason, "跳过数据行");
    }

    let api = DashboardApi::new(Arc::new(dataset), &config);
    let mut selection = api.default_selection(Local::now().date_naive());
    if let Some(start) = &cli.start {
        selection.start_date = parse_date("start_date", start)?;
    }
    if let Some(end) = &cli.end {
        selection.end_date = parse_date("end_date", end)?;
    }

    let mut state = AppState::new(api, selection);
    let labels = Labels::from_locale();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render_dashboard(&state, &labels))?;
    if cli.once {
        return Ok(());
    }

    writeln!(out, "{}", t("cli.help"))?;
    run_loop(&mut state, &labels, io::stdin().lock(), &mut out)
}

/// 命令循环（EOF 或 quit 结束）
fn run_loop<R: BufRead, W: Write>(
    state: &mut AppState,
    labels: &Labels,
    input: R,
    out: &mut W,
) -> Result<()> {
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{}", t("cli.help"))?,
            Ok(Command::Show) => writeln!(out, "{}", render_dashboard(state, labels))?,
            Ok(Command::Event(event)) => match state.dispatch(event) {
                Ok(()) => writeln!(out, "{}", render_dashboard(state, labels))?,
                Err(e) => print_error(out, &e.to_string())?,
            },
            Err(e) => print_error(out, &e.to_string())?,
        }
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn print_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    tracing::debug!(error = message, "命令执行失败");
    writeln!(out, "{}", t_with_args("cli.error", &[("message", message)]))
}
