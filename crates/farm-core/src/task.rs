//! 生產任務模型（排程單位）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TagSet;

/// 生產任務（一盤）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTask {
    /// 任務ID（由元件與盤序推導，同樣輸入得到同樣ID）
    pub id: Uuid,

    /// 盤序（從 0 起算）
    pub plate: u32,

    /// 元件ID
    pub component_id: String,

    /// 元件名稱
    pub component_name: String,

    /// 產出數量
    pub quantity: u32,

    /// 整盤名目耗時（分鐘），與機台無關
    pub duration_min: Decimal,

    /// 所需能力標籤
    pub required_tags: TagSet,
}

impl ProductionTask {
    /// 創建新的生產任務
    pub fn new(
        component_id: impl Into<String>,
        component_name: impl Into<String>,
        quantity: u32,
        duration_min: Decimal,
    ) -> Self {
        let component_id: String = component_id.into();
        Self {
            id: Self::derive_id(&component_id, 0),
            plate: 0,
            component_id,
            component_name: component_name.into(),
            quantity,
            duration_min,
            required_tags: TagSet::new(),
        }
    }

    /// 建構器模式：設置盤序（同時重新推導ID）
    pub fn with_plate(mut self, plate: u32) -> Self {
        self.plate = plate;
        self.id = Self::derive_id(&self.component_id, plate);
        self
    }

    fn derive_id(component_id: &str, plate: u32) -> Uuid {
        let key = format!("{}#{}", component_id, plate);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
    }

    /// 建構器模式：設置所需標籤
    pub fn with_required_tags(mut self, tags: TagSet) -> Self {
        self.required_tags = tags;
        self
    }
}
