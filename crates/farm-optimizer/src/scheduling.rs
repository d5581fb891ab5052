//! 清單排程（LPT 貪婪啟發式）
//!
//! # 演算法
//!
//! 1. 任務依名目耗時由長到短穩定排序（耗時相同保持原順序）
//! 2. 逐一找出標籤相容的機台；沒有相容機台則列為未指派
//! 3. 選擇累計負載最小的相容機台（負載相同取名單中最前者）
//! 4. 任務從該機台目前負載開始，耗時 = 名目耗時 ÷ 速度倍率
//!    （結果超出數值範圍時列為未指派，並附上錯誤等級的警告）
//!
//! 這是貪婪近似解，不保證最佳完工時間。
//!
//! # 複雜度
//! O(T log T + T·M)，T = 任務數，M = 機台數

use farm_calc::{FarmWarning, TagMatcher};
use farm_core::{Assignment, Machine, ProductionTask, SchedulerConfig};
use rust_decimal::Decimal;

use crate::ScheduleResult;

/// 清單排程器
#[derive(Debug, Clone, Default)]
pub struct ListScheduler {
    config: SchedulerConfig,
}

impl ListScheduler {
    /// 創建新的排程器
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// 將任務排程到機台上
    ///
    /// 不可行（無機台、無相容機台）不是錯誤，會以未指派清單回報。
    pub fn schedule(&self, tasks: &[ProductionTask], machines: &[Machine]) -> ScheduleResult {
        tracing::info!(
            "開始排程：任務 {} 筆，機台 {} 台",
            tasks.len(),
            machines.len()
        );

        let start_time = std::time::Instant::now();
        let roster = self.roster(machines);
        let mut result = ScheduleResult::empty();

        if roster.is_empty() {
            tracing::warn!("沒有可用機台，{} 個任務全部未指派", tasks.len());
            for task in tasks {
                result.add_warning(FarmWarning::warning(
                    task.component_id.clone(),
                    "沒有可用機台".to_string(),
                ));
            }
            result.unassigned = tasks.to_vec();
            result.calculation_time_ms = Some(start_time.elapsed().as_millis());
            return result;
        }

        // Step 1: 依耗時由長到短排序（sort_by 為穩定排序）
        let mut ordered: Vec<&ProductionTask> = tasks.iter().collect();
        ordered.sort_by(|a, b| b.duration_min.cmp(&a.duration_min));

        // Step 2-4: 逐一指派到負載最小的相容機台
        let mut loads = vec![Decimal::ZERO; roster.len()];

        for task in ordered {
            let Some(idx) = Self::least_loaded(&roster, &loads, task) else {
                tracing::warn!(
                    "任務 {} ({}) 沒有相容機台，需要標籤: {}",
                    task.component_name,
                    task.quantity,
                    task.required_tags
                );
                result.add_warning(FarmWarning::warning(
                    task.component_id.clone(),
                    format!("沒有具備標籤 [{}] 的機台", task.required_tags),
                ));
                result.unassigned.push(task.clone());
                continue;
            };

            let machine = &roster[idx];
            let start = loads[idx];
            let Some(end) = machine
                .processing_minutes(task.duration_min)
                .and_then(|minutes| start.checked_add(minutes))
            else {
                tracing::warn!(
                    "任務 {} ({}) 在機台 {} 上的耗時超出數值範圍",
                    task.component_name,
                    task.quantity,
                    machine.id
                );
                result.add_warning(FarmWarning::error(
                    task.component_id.clone(),
                    format!(
                        "名目耗時 {} 分鐘在機台 {}（速度 {}）上超出數值範圍",
                        task.duration_min,
                        machine.id,
                        machine.speed_factor()
                    ),
                ));
                result.unassigned.push(task.clone());
                continue;
            };
            loads[idx] = end;

            tracing::debug!(
                "指派: {} x{} → {} ({} - {})",
                task.component_name,
                task.quantity,
                machine.id,
                start,
                end
            );

            result.assignments.push(Assignment {
                machine_id: machine.id.clone(),
                machine_name: machine.name.clone(),
                task: task.clone(),
                start,
                end,
            });
        }

        result.makespan_min = loads.iter().copied().max().unwrap_or(Decimal::ZERO);
        result.machine_loads = roster
            .iter()
            .zip(loads)
            .map(|(machine, load)| (machine.id.clone(), load))
            .collect();
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "排程完成，耗時 {:?}：指派 {} 筆，未指派 {} 筆，完工時間 {} 分鐘",
            start_time.elapsed(),
            result.assignments.len(),
            result.unassigned.len(),
            result.makespan_min
        );

        result
    }

    /// 參與排程的機台（依名單順序，彼此獨立的副本）
    fn roster(&self, machines: &[Machine]) -> Vec<Machine> {
        if self.config.skip_inactive_machines {
            TagMatcher::active_machines(machines)
        } else {
            machines.to_vec()
        }
    }

    /// 相容機台中累計負載最小者；min_by 在相等時回傳第一個
    fn least_loaded(roster: &[Machine], loads: &[Decimal], task: &ProductionTask) -> Option<usize> {
        TagMatcher::compatible_indices(roster, task)
            .into_iter()
            .min_by(|&a, &b| loads[a].cmp(&loads[b]))
    }
}
