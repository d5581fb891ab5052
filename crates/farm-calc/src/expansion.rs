//! 任務展開：將需求拆分為逐盤的生產任務

use farm_core::{ComponentSpec, DemandLine, ProductionOrder, ProductionTask};

/// 任務展開器
pub struct TaskExpander;

impl TaskExpander {
    /// 依元件參數將數量拆分為多盤任務
    ///
    /// - 盤數 = ceil(數量 / 每盤數量)；每盤數量為 0 時整批視為一盤
    /// - 最後一盤可能不滿
    /// - 只有第一盤加上準備時間
    pub fn expand_component(component: &ComponentSpec, quantity: u32) -> Vec<ProductionTask> {
        if quantity == 0 {
            return Vec::new();
        }

        let (plates, batch) = if component.is_batched() {
            (quantity.div_ceil(component.batch_size), component.batch_size)
        } else {
            (1, quantity)
        };

        let mut tasks = Vec::with_capacity(plates as usize);
        let mut remaining = quantity;

        for plate in 0..plates {
            let plate_qty = batch.min(remaining);
            let mut duration = component.per_plate_time_min;
            if plate == 0 {
                duration += component.setup_time_min;
            }

            tasks.push(
                ProductionTask::new(
                    component.component_id.clone(),
                    component.name.clone(),
                    plate_qty,
                    duration,
                )
                .with_plate(plate)
                .with_required_tags(component.required_tags.clone()),
            );

            remaining -= plate_qty;
        }

        tracing::debug!(
            "元件 {} 展開: 數量 {} → {} 盤",
            component.component_id,
            quantity,
            tasks.len()
        );

        tasks
    }

    /// 展開單一需求行
    pub fn expand(line: &DemandLine) -> Vec<ProductionTask> {
        Self::expand_component(&line.component, line.total_required())
    }

    /// 依 BOM 順序展開整張生產訂單
    pub fn expand_order(order: &ProductionOrder) -> Vec<ProductionTask> {
        let tasks: Vec<ProductionTask> = order
            .demand_lines()
            .iter()
            .flat_map(Self::expand)
            .collect();

        tracing::info!(
            "訂單 {} 展開完成：{} 個 BOM 行，{} 個任務",
            order.order_id,
            order.product.bom.len(),
            tasks.len()
        );

        tasks
    }
}
