//! # Farm Core
//!
//! 列印農場核心資料模型與類型定義

pub mod assignment;
pub mod component;
pub mod config;
pub mod machine;
pub mod order;
pub mod tags;
pub mod task;
pub mod units;

// Re-export 主要類型
pub use assignment::{Assignment, AssignmentRecord};
pub use component::{BomLine, ComponentSpec, DemandLine, Product};
pub use config::SchedulerConfig;
pub use machine::Machine;
pub use order::{ProductionLog, ProductionOrder};
pub use tags::TagSet;
pub use task::ProductionTask;
pub use units::{minutes_to_hours, Minutes, MINUTES_PER_HOUR};

use rust_decimal::Decimal;

/// 列印農場錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FarmError {
    #[error("無效的速度倍率: 機台 {machine_id} 的速度 {speed_factor} 必須大於 0")]
    InvalidSpeedFactor {
        machine_id: String,
        speed_factor: Decimal,
    },

    #[error(
        "元件 {component} 的指派總量 ({assigned}) 超過需求量 ({required})，請調整指派"
    )]
    QuantityExceedsRequired {
        component: String,
        assigned: u32,
        required: u32,
    },

    #[error("機台 {0} 未啟用，無法指派")]
    InactiveMachine(String),

    #[error("找不到機台: {0}")]
    MachineNotFound(String),

    #[error("元件 {component_id} 不在產品 {product_id} 的 BOM 中")]
    ComponentNotInBom {
        component_id: String,
        product_id: String,
    },

    #[error("指派記錄屬於訂單 {found}，預期為 {expected}")]
    OrderMismatch { expected: String, found: String },

    #[error("無效的數量: {0}")]
    InvalidQuantity(String),

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("數值超出範圍: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, FarmError>;
