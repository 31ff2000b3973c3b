// ==========================================
// 生产偏差看板 - 应用层
// ==========================================
// 职责: UI 状态与事件分发，终端命令与渲染
// ==========================================

pub mod command;
pub mod render;
pub mod state;

// 重导出
pub use command::{parse_command, Command};
pub use render::{render_dashboard, Labels};
pub use state::{AppState, DetailPanelState, UiEvent};
