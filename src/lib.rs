//! # Print Farm
//!
//! 列印農場排程與產能估算引擎
//!
//! - [`TaskExpander`]：將訂單 BOM 展開為逐盤生產任務
//! - [`ListScheduler`]：LPT 貪婪清單排程
//! - [`CapacityEstimator`]：已指派工作的剩餘時間估算
//!
//! 所有計算皆為純函式：輸入只借用不修改，每次呼叫產生獨立的結果。

pub use farm_calc::{
    ComponentProgress, FarmWarning, OrderProgress, ProgressCalculator, TagMatcher, TaskExpander,
    WarningSeverity,
};
pub use farm_core::*;
pub use farm_optimizer::{
    AssignmentLedger, CapacityEstimator, CapacitySnapshot, ComponentWorkStatus, ListScheduler,
    RemainingTime, ScheduleResult, TaskTime,
};

/// 展開訂單並排程的便捷入口
pub fn schedule_order(
    order: &ProductionOrder,
    machines: &[Machine],
    config: SchedulerConfig,
) -> ScheduleResult {
    let tasks = TaskExpander::expand_order(order);
    ListScheduler::new(config).schedule(&tasks, machines)
}
