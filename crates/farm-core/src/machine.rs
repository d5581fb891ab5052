//! 機台（印表機）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{FarmError, TagSet};

/// 機台
///
/// 速度倍率相對於名目速度 1.0；建構時保證大於 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MachineRecord")]
pub struct Machine {
    /// 機台ID
    pub id: String,

    /// 機台名稱
    pub name: String,

    /// 是否啟用（只有啟用的機台參與排程）
    pub is_active: bool,

    /// 速度倍率
    speed_factor: Decimal,

    /// 能力標籤
    pub tags: TagSet,
}

impl Machine {
    /// 創建新的機台（預設啟用、名目速度、無標籤）
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            speed_factor: Self::default_speed(),
            tags: TagSet::new(),
        }
    }

    /// 名目速度倍率
    pub fn default_speed() -> Decimal {
        Decimal::ONE
    }

    /// 建構器模式：設置速度倍率
    pub fn with_speed_factor(mut self, speed_factor: Decimal) -> crate::Result<Self> {
        if speed_factor <= Decimal::ZERO {
            return Err(FarmError::InvalidSpeedFactor {
                machine_id: self.id,
                speed_factor,
            });
        }
        self.speed_factor = speed_factor;
        Ok(self)
    }

    /// 建構器模式：設置能力標籤
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// 建構器模式：設置啟用狀態
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn speed_factor(&self) -> Decimal {
        self.speed_factor
    }

    /// 計算任務在此機台上的實際耗時（分鐘）
    ///
    /// 結果超出 `Decimal` 範圍時回傳 `None`（例如極小的速度倍率）。
    pub fn processing_minutes(&self, nominal_minutes: Decimal) -> Option<Decimal> {
        nominal_minutes.checked_div(self.speed_factor)
    }
}

/// 反序列化用的原始機台資料（經驗證後轉為 `Machine`）
#[derive(Deserialize)]
struct MachineRecord {
    id: String,
    name: String,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default = "Machine::default_speed")]
    speed_factor: Decimal,
    #[serde(default)]
    tags: TagSet,
}

fn default_active() -> bool {
    true
}

impl TryFrom<MachineRecord> for Machine {
    type Error = FarmError;

    fn try_from(record: MachineRecord) -> Result<Self, Self::Error> {
        Machine::new(record.id, record.name)
            .with_active(record.is_active)
            .with_tags(record.tags)
            .with_speed_factor(record.speed_factor)
    }
}
