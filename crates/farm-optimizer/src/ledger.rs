//! 指派記錄的准入檢查
//!
//! 新記錄在寫入之前先經過驗證，違反條件的記錄會被拒絕，不做任何截斷。

use farm_core::{AssignmentRecord, FarmError, Machine, ProductionOrder};

/// 單一訂單的指派帳本
pub struct AssignmentLedger<'a> {
    order: &'a ProductionOrder,
    machines: &'a [Machine],
    records: Vec<AssignmentRecord>,
}

impl<'a> AssignmentLedger<'a> {
    /// 以現有記錄建立帳本（只保留屬於此訂單的記錄）
    pub fn new(
        order: &'a ProductionOrder,
        machines: &'a [Machine],
        existing: &[AssignmentRecord],
    ) -> Self {
        let records = existing
            .iter()
            .filter(|r| r.order_id == order.order_id)
            .cloned()
            .collect();

        Self {
            order,
            machines,
            records,
        }
    }

    /// 元件已指派的總量（不論機台狀態）
    pub fn assigned_for(&self, component_id: &str) -> u32 {
        self.records
            .iter()
            .filter(|r| r.component_id == component_id)
            .fold(0u32, |acc, r| acc.saturating_add(r.quantity))
    }

    /// 元件尚可指派的數量
    pub fn assignable_for(&self, component_id: &str) -> u32 {
        self.order
            .required_for(component_id)
            .saturating_sub(self.assigned_for(component_id))
    }

    /// 驗證並接受新的指派記錄
    pub fn admit(&mut self, record: AssignmentRecord) -> farm_core::Result<&AssignmentRecord> {
        if record.order_id != self.order.order_id {
            return Err(FarmError::OrderMismatch {
                expected: self.order.order_id.clone(),
                found: record.order_id,
            });
        }

        if record.quantity == 0 {
            return Err(FarmError::InvalidQuantity(format!(
                "指派記錄 {} 的數量必須至少為 1",
                record.id
            )));
        }

        let line = self
            .order
            .product
            .bom_line(&record.component_id)
            .ok_or_else(|| FarmError::ComponentNotInBom {
                component_id: record.component_id.clone(),
                product_id: self.order.product.product_id.clone(),
            })?;

        let machine = self
            .machines
            .iter()
            .find(|m| m.id == record.machine_id)
            .ok_or_else(|| FarmError::MachineNotFound(record.machine_id.clone()))?;

        if !machine.is_active {
            return Err(FarmError::InactiveMachine(machine.id.clone()));
        }

        let required = self.order.required_for(&record.component_id);
        let assigned = self
            .assigned_for(&record.component_id)
            .saturating_add(record.quantity);
        if assigned > required {
            tracing::warn!(
                "拒絕指派記錄 {}：元件 {} 總量 {} 超過需求 {}",
                record.id,
                record.component_id,
                assigned,
                required
            );
            return Err(FarmError::QuantityExceedsRequired {
                component: line.component.name.clone(),
                assigned,
                required,
            });
        }

        tracing::debug!(
            "接受指派記錄 {}：{} x{} → {}",
            record.id,
            record.component_id,
            record.quantity,
            record.machine_id
        );

        self.records.push(record);
        let idx = self.records.len() - 1;
        Ok(&self.records[idx])
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AssignmentRecord> {
        self.records
    }
}
