//! 生產進度與名目剩餘時間

use farm_core::{ProductionLog, ProductionOrder};
use rust_decimal::Decimal;
use serde::Serialize;

/// 單一元件的進度
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentProgress {
    pub component_id: String,
    pub component_name: String,
    pub required_qty: u32,
    pub completed_qty: u32,
    /// 完成百分比（0-100）
    pub progress_percent: Decimal,
    /// 剩餘數量的名目列印時間（分鐘，單機串行）
    pub nominal_remaining_min: Decimal,
}

/// 整張訂單的進度
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderProgress {
    pub order_id: String,
    pub components: Vec<ComponentProgress>,
    pub total_required: u32,
    pub total_completed: u32,
    /// 以需求量加權的完成百分比
    pub progress_percent: Decimal,
    /// 各元件名目剩餘時間的最大值（分鐘）
    pub nominal_remaining_min: Decimal,
}

/// 進度計算器
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// 完成百分比，上限 100；需求為 0 時視為 100
    pub fn percent(required: u32, completed: u32) -> Decimal {
        if required == 0 {
            return Decimal::ONE_HUNDRED;
        }
        let ratio = Decimal::from(completed) / Decimal::from(required) * Decimal::ONE_HUNDRED;
        ratio.min(Decimal::ONE_HUNDRED)
    }

    /// 計算訂單進度
    pub fn calculate(order: &ProductionOrder, logs: &[ProductionLog]) -> OrderProgress {
        let components: Vec<ComponentProgress> = order
            .product
            .bom
            .iter()
            .map(|line| {
                let component = &line.component;
                let required = order.required_for(&component.component_id);
                let completed = ProductionLog::completed_quantity(
                    logs,
                    &order.order_id,
                    &component.component_id,
                );
                let remaining = required.saturating_sub(completed);

                ComponentProgress {
                    component_id: component.component_id.clone(),
                    component_name: component.name.clone(),
                    required_qty: required,
                    completed_qty: completed,
                    progress_percent: Self::percent(required, completed),
                    nominal_remaining_min: Decimal::from(remaining) * component.unit_time_min,
                }
            })
            .collect();

        let total_required = components
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.required_qty));
        let total_completed = components
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.completed_qty));
        let nominal_remaining_min = components
            .iter()
            .map(|c| c.nominal_remaining_min)
            .max()
            .unwrap_or(Decimal::ZERO);

        tracing::debug!(
            "訂單 {} 進度: {}/{}",
            order.order_id,
            total_completed,
            total_required
        );

        OrderProgress {
            order_id: order.order_id.clone(),
            components,
            total_required,
            total_completed,
            progress_percent: Self::percent(total_required, total_completed),
            nominal_remaining_min,
        }
    }
}
