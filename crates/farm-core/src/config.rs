//! 排程引擎配置

use serde::{Deserialize, Serialize};

use crate::FarmError;

/// 排程與產能估算配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// 是否略過名單中未啟用的機台
    /// - true: 只使用啟用機台（預設）
    /// - false: 呼叫端已自行過濾，名單中的機台全部參與
    pub skip_inactive_machines: bool,

    /// 指派記錄引用了名單中不存在的機台時的處理方式
    /// - false: 忽略該記錄並產生警告（預設）
    /// - true: 視為錯誤 `MachineNotFound`
    pub strict_roster: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            skip_inactive_machines: true,
            strict_roster: false,
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置是否略過未啟用機台
    pub fn with_skip_inactive_machines(mut self, skip: bool) -> Self {
        self.skip_inactive_machines = skip;
        self
    }

    /// 建構器模式：設置是否嚴格檢查機台名單
    pub fn with_strict_roster(mut self, strict: bool) -> Self {
        self.strict_roster = strict;
        self
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| FarmError::Config(e.to_string()))
    }
}
