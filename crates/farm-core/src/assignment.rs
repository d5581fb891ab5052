//! 指派模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ProductionTask;

/// 排程指派（排程計算結果）
///
/// 同一機台上的指派依開始時間遞增排列，且前一筆的結束即為下一筆的開始。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// 機台ID
    pub machine_id: String,

    /// 機台名稱
    pub machine_name: String,

    /// 指派的任務
    pub task: ProductionTask,

    /// 開始時間（分鐘，自排程起點起算）
    pub start: Decimal,

    /// 結束時間（分鐘）
    pub end: Decimal,
}

impl Assignment {
    /// 機台上的實際耗時（分鐘）
    pub fn duration(&self) -> Decimal {
        self.end - self.start
    }
}

/// 已存在的指派記錄（來自外部資料來源）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// 記錄ID
    pub id: Uuid,

    /// 生產訂單ID
    pub order_id: String,

    /// 元件ID
    pub component_id: String,

    /// 機台ID
    pub machine_id: String,

    /// 指派數量
    pub quantity: u32,
}

impl AssignmentRecord {
    /// 創建新的指派記錄
    pub fn new(
        order_id: impl Into<String>,
        component_id: impl Into<String>,
        machine_id: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: order_id.into(),
            component_id: component_id.into(),
            machine_id: machine_id.into(),
            quantity,
        }
    }

    /// 檢查記錄是否屬於指定訂單的指定元件
    pub fn matches(&self, order_id: &str, component_id: &str) -> bool {
        self.order_id == order_id && self.component_id == component_id
    }
}
