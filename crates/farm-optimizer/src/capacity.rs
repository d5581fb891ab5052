//! 產能估算：已指派工作的剩餘時間
//!
//! 每個元件：
//! - 剩餘數量 = max(需求 - 已完成, 0)
//! - 產能 = 持有該元件指派的啟用機台速度倍率總和
//! - 剩餘時間 = 剩餘數量 × 單件時間 ÷ 產能；剩餘數量為 0 時為 0；產能為 0 時無法估算
//!
//! 訂單剩餘時間取各元件有限剩餘時間的最大值（元件並行生產，瓶頸元件決定完工）。

use std::fmt;

use chrono::{DateTime, Utc};
use farm_calc::FarmWarning;
use farm_core::{
    AssignmentRecord, ComponentSpec, FarmError, Machine, Minutes, ProductionLog,
    ProductionOrder, SchedulerConfig,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// 剩餘時間：有限值（分鐘）或無法估算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "minutes", rename_all = "snake_case")]
pub enum RemainingTime {
    Finite(Decimal),
    /// 尚有剩餘數量，但沒有任何啟用機台被指派
    Unknown,
}

impl RemainingTime {
    pub fn minutes(&self) -> Option<Decimal> {
        match self {
            RemainingTime::Finite(minutes) => Some(*minutes),
            RemainingTime::Unknown => None,
        }
    }

    pub fn hours(&self) -> Option<Decimal> {
        self.minutes().map(farm_core::minutes_to_hours)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RemainingTime::Unknown)
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemainingTime::Finite(minutes) => write!(f, "{}", Minutes(*minutes)),
            RemainingTime::Unknown => write!(f, "無法估算"),
        }
    }
}

/// 單筆指派在其機台上的耗時
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskTime {
    pub record_id: Uuid,
    pub machine_id: String,
    pub quantity: u32,
    /// 數量 × 單件時間 ÷ 機台速度（分鐘）
    pub time_min: Decimal,
}

/// 元件工作狀態快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentWorkStatus {
    pub component_id: String,
    pub component_name: String,
    /// 單件名目時間（分鐘）
    pub unit_time_min: Decimal,
    pub required_qty: u32,
    pub completed_qty: u32,
    pub assigned_qty: u32,
    pub remaining_qty: u32,
    /// 指派機台的速度倍率總和
    pub capacity: Decimal,
    pub remaining_time: RemainingTime,
    pub tasks: Vec<TaskTime>,
}

impl ComponentWorkStatus {
    pub fn remaining_hours(&self) -> Option<Decimal> {
        self.remaining_time.hours()
    }
}

/// 訂單產能快照
#[derive(Debug, Clone, Serialize)]
pub struct CapacitySnapshot {
    pub order_id: String,
    pub components: Vec<ComponentWorkStatus>,

    /// 各元件有限剩餘時間的最大值（分鐘）
    pub total_remaining_min: Decimal,

    /// 剩餘時間無法估算的元件（阻擋完工，與數值最大值分開回報）
    pub blocked_components: Vec<String>,

    pub warnings: Vec<FarmWarning>,
    pub computed_at: DateTime<Utc>,
    pub calculation_time_ms: Option<u128>,
}

impl CapacitySnapshot {
    pub fn total_remaining_hours(&self) -> Decimal {
        farm_core::minutes_to_hours(self.total_remaining_min)
    }

    /// 是否有元件阻擋完工
    pub fn is_blocked(&self) -> bool {
        !self.blocked_components.is_empty()
    }

    pub fn component(&self, component_id: &str) -> Option<&ComponentWorkStatus> {
        self.components
            .iter()
            .find(|c| c.component_id == component_id)
    }
}

/// 產能估算器
#[derive(Debug, Clone, Default)]
pub struct CapacityEstimator {
    config: SchedulerConfig,
}

impl CapacityEstimator {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// 計算訂單的產能快照
    ///
    /// 指派總量超過需求量時回傳 `QuantityExceedsRequired`，不會自動截斷；
    /// 時間或產能超出 `Decimal` 範圍時回傳 `Overflow`。
    pub fn estimate(
        &self,
        order: &ProductionOrder,
        logs: &[ProductionLog],
        records: &[AssignmentRecord],
        machines: &[Machine],
    ) -> farm_core::Result<CapacitySnapshot> {
        tracing::info!(
            "開始產能估算：訂單 {}，指派記錄 {} 筆，生產紀錄 {} 筆",
            order.order_id,
            records.len(),
            logs.len()
        );

        let start_time = std::time::Instant::now();
        let mut warnings = Vec::new();
        let mut components = Vec::with_capacity(order.product.bom.len());

        for record in records.iter().filter(|r| r.order_id == order.order_id) {
            if order.product.bom_line(&record.component_id).is_none() {
                warnings.push(FarmWarning::warning(
                    record.component_id.clone(),
                    format!("指派記錄 {} 的元件不在 BOM 中，已忽略", record.id),
                ));
            }
        }

        for line in &order.product.bom {
            let status =
                self.component_status(order, &line.component, logs, records, machines, &mut warnings)?;
            components.push(status);
        }

        let total_remaining_min = components
            .iter()
            .filter_map(|c| c.remaining_time.minutes())
            .max()
            .unwrap_or(Decimal::ZERO);

        let blocked_components: Vec<String> = components
            .iter()
            .filter(|c| c.remaining_time.is_unknown())
            .map(|c| c.component_id.clone())
            .collect();

        tracing::info!(
            "產能估算完成，耗時 {:?}：剩餘 {} 分鐘，阻擋元件 {} 個",
            start_time.elapsed(),
            total_remaining_min,
            blocked_components.len()
        );

        Ok(CapacitySnapshot {
            order_id: order.order_id.clone(),
            components,
            total_remaining_min,
            blocked_components,
            warnings,
            computed_at: Utc::now(),
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }

    /// 單元件狀態
    fn component_status(
        &self,
        order: &ProductionOrder,
        component: &ComponentSpec,
        logs: &[ProductionLog],
        records: &[AssignmentRecord],
        machines: &[Machine],
        warnings: &mut Vec<FarmWarning>,
    ) -> farm_core::Result<ComponentWorkStatus> {
        let component_id = &component.component_id;
        let required = order.required_for(component_id);
        let completed = ProductionLog::completed_quantity(logs, &order.order_id, component_id);
        let remaining = required.saturating_sub(completed);

        let mut assigned = 0u32;
        let mut capacity = Decimal::ZERO;
        let mut tasks = Vec::new();

        for record in records
            .iter()
            .filter(|r| r.matches(&order.order_id, component_id))
        {
            let Some(machine) = self.lookup_machine(record, machines, warnings)? else {
                continue;
            };

            let time_min = Decimal::from(record.quantity)
                .checked_mul(component.unit_time_min)
                .and_then(|nominal| machine.processing_minutes(nominal))
                .ok_or_else(|| {
                    FarmError::Overflow(format!(
                        "元件 {} 在機台 {} 上的指派耗時",
                        component.name, machine.id
                    ))
                })?;
            capacity = capacity
                .checked_add(machine.speed_factor())
                .ok_or_else(|| {
                    FarmError::Overflow(format!("元件 {} 的產能總和", component.name))
                })?;
            assigned = assigned.saturating_add(record.quantity);
            tasks.push(TaskTime {
                record_id: record.id,
                machine_id: machine.id.clone(),
                quantity: record.quantity,
                time_min,
            });
        }

        if assigned > required {
            tracing::warn!(
                "元件 {} 指派總量 {} 超過需求量 {}",
                component_id,
                assigned,
                required
            );
            return Err(FarmError::QuantityExceedsRequired {
                component: component.name.clone(),
                assigned,
                required,
            });
        }

        let remaining_time = if remaining == 0 {
            RemainingTime::Finite(Decimal::ZERO)
        } else if capacity > Decimal::ZERO {
            let minutes = Decimal::from(remaining)
                .checked_mul(component.unit_time_min)
                .and_then(|nominal| nominal.checked_div(capacity))
                .ok_or_else(|| {
                    FarmError::Overflow(format!("元件 {} 的剩餘時間", component.name))
                })?;
            RemainingTime::Finite(minutes)
        } else {
            tracing::warn!("元件 {} 尚餘 {} 件但沒有指派機台", component_id, remaining);
            warnings.push(FarmWarning::warning(
                component_id.clone(),
                format!("尚餘 {} 件但沒有指派啟用機台，無法估算剩餘時間", remaining),
            ));
            RemainingTime::Unknown
        };

        tracing::debug!(
            "元件 {}: 需求 {}, 完成 {}, 指派 {}, 產能 {}",
            component_id,
            required,
            completed,
            assigned,
            capacity
        );

        Ok(ComponentWorkStatus {
            component_id: component_id.clone(),
            component_name: component.name.clone(),
            unit_time_min: component.unit_time_min,
            required_qty: required,
            completed_qty: completed,
            assigned_qty: assigned,
            remaining_qty: remaining,
            capacity,
            remaining_time,
            tasks,
        })
    }

    /// 找出記錄所在的機台；未啟用機台的記錄不計入產能
    fn lookup_machine<'m>(
        &self,
        record: &AssignmentRecord,
        machines: &'m [Machine],
        warnings: &mut Vec<FarmWarning>,
    ) -> farm_core::Result<Option<&'m Machine>> {
        let Some(machine) = machines.iter().find(|m| m.id == record.machine_id) else {
            if self.config.strict_roster {
                return Err(FarmError::MachineNotFound(record.machine_id.clone()));
            }
            warnings.push(FarmWarning::warning(
                record.component_id.clone(),
                format!("指派記錄 {} 引用了不存在的機台 {}", record.id, record.machine_id),
            ));
            return Ok(None);
        };

        if self.config.skip_inactive_machines && !machine.is_active {
            warnings.push(FarmWarning::info(
                record.component_id.clone(),
                format!("指派記錄 {} 位於未啟用機台 {}，不計入產能", record.id, machine.id),
            ));
            return Ok(None);
        }

        Ok(Some(machine))
    }
}
