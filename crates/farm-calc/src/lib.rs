//! # Farm Calculation
//!
//! 標籤匹配、任務展開與進度計算

pub mod expansion;
pub mod matching;
pub mod progress;

// Re-export 主要類型
pub use expansion::TaskExpander;
pub use matching::TagMatcher;
pub use progress::{ComponentProgress, OrderProgress, ProgressCalculator};

use serde::Serialize;

/// 計算警告（不可行但非致命的情況）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmWarning {
    /// 相關元件
    pub component_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl FarmWarning {
    pub fn new(component_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            component_id,
            message,
            severity,
        }
    }

    pub fn info(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Info)
    }

    pub fn warning(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Warning)
    }

    pub fn error(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Error)
    }
}

/// 警告等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    /// 記錄被略過（例如位於未啟用機台）
    Info,
    /// 任務未指派或剩餘時間無法估算
    Warning,
    /// 時間超出數值範圍
    Error,
}
