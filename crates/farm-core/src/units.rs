//! 時間單位換算

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: i64 = 60;

/// 分鐘換算為小時
pub fn minutes_to_hours(minutes: Decimal) -> Decimal {
    minutes / Decimal::from(MINUTES_PER_HOUR)
}

/// 分鐘數，顯示為 `{h}h{mm}`
///
/// 不足一分鐘的部分捨去，負值顯示為 `0h00`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub Decimal);

impl Minutes {
    pub fn hours(self) -> Decimal {
        minutes_to_hours(self.0)
    }
}

impl From<Decimal> for Minutes {
    fn from(minutes: Decimal) -> Self {
        Self(minutes)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.trunc().to_i64().unwrap_or(0).max(0);
        write!(f, "{}h{:02}", total / MINUTES_PER_HOUR, total % MINUTES_PER_HOUR)
    }
}
