//! # Farm Optimizer
//!
//! 排程與產能估算模組

pub mod capacity;
pub mod ledger;
pub mod scheduling;

// Re-export 主要類型
pub use capacity::{
    CapacityEstimator, CapacitySnapshot, ComponentWorkStatus, RemainingTime, TaskTime,
};
pub use ledger::AssignmentLedger;
pub use scheduling::ListScheduler;

use farm_calc::FarmWarning;
use farm_core::{Assignment, Minutes, ProductionTask};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 排程結果
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResult {
    /// 指派清單（依指派順序）
    pub assignments: Vec<Assignment>,

    /// 無法指派的任務
    pub unassigned: Vec<ProductionTask>,

    /// 完工時間（分鐘），所有機台最大累計負載
    pub makespan_min: Decimal,

    /// 各機台累計負載（分鐘）
    pub machine_loads: BTreeMap<String, Decimal>,

    /// 警告信息
    pub warnings: Vec<FarmWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ScheduleResult {
    /// 創建空的排程結果
    pub fn empty() -> Self {
        Self {
            assignments: Vec::new(),
            unassigned: Vec::new(),
            makespan_min: Decimal::ZERO,
            machine_loads: BTreeMap::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: FarmWarning) {
        self.warnings.push(warning);
    }

    /// 所有任務都已指派
    pub fn is_feasible(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// 完工時間（小時）
    pub fn makespan_hours(&self) -> Decimal {
        farm_core::minutes_to_hours(self.makespan_min)
    }

    /// 指定機台的時間軸（依開始時間排序）
    pub fn timeline(&self, machine_id: &str) -> Vec<&Assignment> {
        let mut timeline: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.machine_id == machine_id)
            .collect();
        timeline.sort_by(|a, b| a.start.cmp(&b.start));
        timeline
    }

    /// 已指派的總數量
    pub fn assigned_quantity(&self) -> u32 {
        self.assignments
            .iter()
            .fold(0u32, |acc, a| acc.saturating_add(a.task.quantity))
    }
}

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "指派 {} 筆，未指派 {} 筆，完工時間 {}",
            self.assignments.len(),
            self.unassigned.len(),
            Minutes(self.makespan_min)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_display() {
        let mut result = ScheduleResult::empty();
        result.makespan_min = Decimal::from(95);

        assert_eq!(result.to_string(), "指派 0 筆，未指派 0 筆，完工時間 1h35");
        assert!(result.is_feasible());
        assert_eq!(result.assigned_quantity(), 0);
    }
}
