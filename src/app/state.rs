// ==========================================
// 生产偏差看板 - 应用状态
// ==========================================
// 职责: 持有 UI 状态（选择条件 / 下拉选项 / 当前表格 / 明细面板），
//       按 UiEvent 调用纯查询核心重新计算
// 约束: 单线程同步，每个事件完整重算，不做缓存
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::api::{ApiError, ApiResult, DashboardApi, DashboardView, DetailPanel};
use crate::domain::dataset::Dataset;
use crate::domain::selection::Selection;
use crate::domain::types::Scope;

// ==========================================
// UI 事件
// ==========================================

/// UI 事件（来自下拉框 / 日期控件 / 表格点击 / 分页器）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    BusinessUnitChanged(Scope),
    ProductGroupChanged(Scope),
    DateRangeChanged { start: NaiveDate, end: NaiveDate },
    /// 当前表格中的行下标（0 起）
    RowSelected(usize),
    /// 明细页码（1 起）
    DetailPageChanged(usize),
}

// ==========================================
// 明细面板状态
// ==========================================
// Empty → Showing(product) → Showing(other product) ...
// 过滤条件变化时保持当前产品，不回到 Empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailPanelState {
    Empty,
    Showing { product_name: String, page: usize },
}

impl Default for DetailPanelState {
    fn default() -> Self {
        DetailPanelState::Empty
    }
}

// ==========================================
// AppState - 应用状态
// ==========================================

/// 应用状态
///
/// 持有看板 API 和当前交互状态，由终端前端驱动
pub struct AppState {
    api: DashboardApi,
    selection: Selection,
    product_group_options: Vec<String>,
    view: DashboardView,
    detail_panel: DetailPanelState,
}

impl AppState {
    /// 创建应用状态并完成首次查询
    pub fn new(api: DashboardApi, selection: Selection) -> Self {
        let product_group_options = api.product_group_options(&selection.business_unit);
        let view = api.query(&selection);
        info!(
            rows = view.rows.len(),
            start = %selection.start_date,
            end = %selection.end_date,
            "看板状态初始化完成"
        );
        Self {
            api,
            selection,
            product_group_options,
            view,
            detail_panel: DetailPanelState::Empty,
        }
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn api(&self) -> &DashboardApi {
        &self.api
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        self.api.dataset()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn business_unit_options(&self) -> Vec<String> {
        self.api.business_unit_options()
    }

    pub fn product_group_options(&self) -> &[String] {
        &self.product_group_options
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn detail_state(&self) -> &DetailPanelState {
        &self.detail_panel
    }

    /// 当前明细面板内容（Empty 时为 None）
    pub fn detail_panel(&self) -> Option<DetailPanel> {
        match &self.detail_panel {
            DetailPanelState::Empty => None,
            DetailPanelState::Showing { product_name, page } => {
                Some(self.api.detail_panel(product_name, *page))
            }
        }
    }

    // ==========================================
    // 事件分发
    // ==========================================

    /// 处理一个 UI 事件
    ///
    /// 失败时状态保持不变
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: UiEvent) -> ApiResult<()> {
        match event {
            UiEvent::BusinessUnitChanged(unit) => {
                self.product_group_options = self.api.product_group_options(&unit);
                if !self.group_still_offered() {
                    debug!(group = %self.selection.product_group, "产品组不在新选项中，回退到 ALL");
                    self.selection.product_group = Scope::All;
                }
                self.selection.business_unit = unit;
                self.refresh();
            }
            UiEvent::ProductGroupChanged(group) => {
                self.selection.product_group = group;
                self.refresh();
            }
            UiEvent::DateRangeChanged { start, end } => {
                self.selection.start_date = start;
                self.selection.end_date = end;
                self.refresh();
            }
            UiEvent::RowSelected(index) => {
                let row = self.view.rows.get(index).ok_or(ApiError::RowOutOfRange {
                    row: index,
                    len: self.view.rows.len(),
                })?;
                self.detail_panel = DetailPanelState::Showing {
                    product_name: row.record.product_name.clone(),
                    page: 1,
                };
            }
            UiEvent::DetailPageChanged(page) => {
                let product_name = match &self.detail_panel {
                    DetailPanelState::Empty => {
                        return Err(ApiError::InvalidStateTransition(
                            "明细面板为空，无法翻页".to_string(),
                        ));
                    }
                    DetailPanelState::Showing { product_name, .. } => product_name.clone(),
                };
                let clamped = self.api.detail_panel(&product_name, page).page;
                self.detail_panel = DetailPanelState::Showing {
                    product_name,
                    page: clamped,
                };
            }
        }
        Ok(())
    }

    /// 重新计算表格与图表
    fn refresh(&mut self) {
        self.view = self.api.query(&self.selection);
    }

    fn group_still_offered(&self) -> bool {
        match &self.selection.product_group {
            Scope::All => true,
            Scope::Only(group) => self.product_group_options.iter().any(|g| g == group),
        }
    }
}
