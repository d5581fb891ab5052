//! 元件、BOM 與需求行模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TagSet;

/// 元件生產參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// 元件ID
    pub component_id: String,

    /// 元件名稱
    pub name: String,

    /// 每盤數量（0 表示不分批，整批一盤）
    pub batch_size: u32,

    /// 每盤列印時間（分鐘，名目速度）
    pub per_plate_time_min: Decimal,

    /// 首盤額外的準備時間（分鐘）
    pub setup_time_min: Decimal,

    /// 單件名目列印時間（分鐘），供產能估算使用
    pub unit_time_min: Decimal,

    /// 所需能力標籤
    pub required_tags: TagSet,
}

impl ComponentSpec {
    /// 創建新的元件參數（每盤 1 件，時間為 0）
    pub fn new(component_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            name: name.into(),
            batch_size: 1,
            per_plate_time_min: Decimal::ZERO,
            setup_time_min: Decimal::ZERO,
            unit_time_min: Decimal::ZERO,
            required_tags: TagSet::new(),
        }
    }

    /// 建構器模式：設置每盤數量
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// 建構器模式：設置每盤列印時間
    pub fn with_per_plate_time(mut self, minutes: Decimal) -> Self {
        self.per_plate_time_min = minutes;
        self
    }

    /// 建構器模式：設置準備時間
    pub fn with_setup_time(mut self, minutes: Decimal) -> Self {
        self.setup_time_min = minutes;
        self
    }

    /// 建構器模式：設置單件列印時間
    pub fn with_unit_time(mut self, minutes: Decimal) -> Self {
        self.unit_time_min = minutes;
        self
    }

    /// 建構器模式：設置所需標籤
    pub fn with_required_tags(mut self, tags: TagSet) -> Self {
        self.required_tags = tags;
        self
    }

    /// 是否分批列印
    pub fn is_batched(&self) -> bool {
        self.batch_size > 0
    }
}

/// BOM 行：每單位產品所需的元件數量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub component: ComponentSpec,
    pub quantity_per_unit: u32,
}

impl BomLine {
    pub fn new(component: ComponentSpec, quantity_per_unit: u32) -> Self {
        Self {
            component,
            quantity_per_unit,
        }
    }

    /// 每單位產品的名目列印時間（分鐘）
    pub fn line_minutes(&self) -> Decimal {
        self.component.unit_time_min * Decimal::from(self.quantity_per_unit)
    }
}

/// 產品
///
/// 每個元件在 BOM 中只佔一行；重複加入同一元件時用量合併到既有行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct Product {
    /// 產品ID
    pub product_id: String,

    /// 產品名稱
    pub name: String,

    /// 物料清單（依順序展開）
    pub bom: Vec<BomLine>,
}

impl Product {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            bom: Vec::new(),
        }
    }

    /// 建構器模式：添加 BOM 行（元件已存在時累加用量，保留原有參數）
    pub fn with_bom_line(mut self, component: ComponentSpec, quantity_per_unit: u32) -> Self {
        match self
            .bom
            .iter_mut()
            .find(|line| line.component.component_id == component.component_id)
        {
            Some(line) => {
                line.quantity_per_unit = line.quantity_per_unit.saturating_add(quantity_per_unit);
            }
            None => self.bom.push(BomLine::new(component, quantity_per_unit)),
        }
        self
    }

    /// 查找元件的 BOM 行
    pub fn bom_line(&self, component_id: &str) -> Option<&BomLine> {
        self.bom
            .iter()
            .find(|line| line.component.component_id == component_id)
    }

    /// 生產指定數量時某元件的需求量（不在 BOM 中則為 0）
    pub fn required_for(&self, component_id: &str, order_quantity: u32) -> u32 {
        self.bom_line(component_id)
            .map(|line| line.quantity_per_unit.saturating_mul(order_quantity))
            .unwrap_or(0)
    }

    /// 生產指定數量所需的名目總列印時間（分鐘，串行計）
    pub fn nominal_build_minutes(&self, quantity: u32) -> Decimal {
        self.bom
            .iter()
            .map(|line| line.line_minutes() * Decimal::from(quantity))
            .sum()
    }

    /// 將 BOM 展開為需求行
    pub fn demand_lines(&self, order_quantity: u32) -> Vec<DemandLine> {
        self.bom
            .iter()
            .map(|line| {
                DemandLine::new(
                    line.component.clone(),
                    line.quantity_per_unit,
                    order_quantity,
                )
            })
            .collect()
    }
}

/// 反序列化用的原始產品資料（BOM 行經合併後轉為 `Product`）
#[derive(Deserialize)]
struct ProductRecord {
    product_id: String,
    name: String,
    #[serde(default)]
    bom: Vec<BomLine>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        record
            .bom
            .into_iter()
            .fold(Product::new(record.product_id, record.name), |product, line| {
                product.with_bom_line(line.component, line.quantity_per_unit)
            })
    }
}

/// 需求行：元件 × 每單位用量 × 訂單數量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandLine {
    pub component: ComponentSpec,
    pub quantity_per_unit: u32,
    pub order_quantity: u32,
}

impl DemandLine {
    pub fn new(component: ComponentSpec, quantity_per_unit: u32, order_quantity: u32) -> Self {
        Self {
            component,
            quantity_per_unit,
            order_quantity,
        }
    }

    /// 總需求量 = 每單位用量 × 訂單數量
    pub fn total_required(&self) -> u32 {
        self.quantity_per_unit.saturating_mul(self.order_quantity)
    }
}
