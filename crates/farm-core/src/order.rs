//! 生產訂單與生產紀錄模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DemandLine, Product};

/// 生產訂單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    /// 訂單ID
    pub order_id: String,

    /// 產品
    pub product: Product,

    /// 訂單數量
    pub quantity: u32,
}

impl ProductionOrder {
    pub fn new(order_id: impl Into<String>, product: Product, quantity: u32) -> Self {
        Self {
            order_id: order_id.into(),
            product,
            quantity,
        }
    }

    /// 某元件的需求量 = BOM 用量 × 訂單數量
    pub fn required_for(&self, component_id: &str) -> u32 {
        self.product.required_for(component_id, self.quantity)
    }

    /// 展開為需求行
    pub fn demand_lines(&self) -> Vec<DemandLine> {
        self.product.demand_lines(self.quantity)
    }
}

/// 生產紀錄（已完成數量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLog {
    /// 紀錄ID
    pub id: Uuid,

    /// 訂單ID
    pub order_id: String,

    /// 元件ID
    pub component_id: String,

    /// 完成數量
    pub quantity: u32,

    /// 紀錄時間
    pub logged_at: DateTime<Utc>,
}

impl ProductionLog {
    /// 創建新的生產紀錄（時間為現在）
    pub fn new(order_id: impl Into<String>, component_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: order_id.into(),
            component_id: component_id.into(),
            quantity,
            logged_at: Utc::now(),
        }
    }

    /// 建構器模式：設置紀錄時間
    pub fn with_logged_at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = logged_at;
        self
    }

    /// 加總指定訂單、元件的完成數量
    pub fn completed_quantity(logs: &[ProductionLog], order_id: &str, component_id: &str) -> u32 {
        logs.iter()
            .filter(|log| log.order_id == order_id && log.component_id == component_id)
            .fold(0u32, |acc, log| acc.saturating_add(log.quantity))
    }
}
