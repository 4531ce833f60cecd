//! 求解器配置

use serde::{Deserialize, Serialize};

/// 分支定界求解器參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// 最多探索的節點數，超過即回報逾時
    pub max_nodes: usize,

    /// 求解時間上限（毫秒），None 表示不限時間
    pub time_limit_ms: Option<u64>,

    /// 整數判定容差：與最近整數差距小於此值視為整數
    pub integrality_tolerance: f64,

    /// 剪枝容差：LP 上界不超過目前最佳解加此值時剪枝
    pub optimality_tolerance: f64,
}

impl SolverConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            max_nodes: 100_000,
            time_limit_ms: Some(10_000),
            integrality_tolerance: 1e-6,
            optimality_tolerance: 1e-6,
        }
    }

    /// 建構器模式：設置節點上限
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// 建構器模式：設置時間上限
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// 建構器模式：取消時間上限（僅受節點上限約束）
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_ms = None;
        self
    }

    /// 建構器模式：設置整數判定容差
    pub fn with_integrality_tolerance(mut self, tolerance: f64) -> Self {
        self.integrality_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置剪枝容差
    pub fn with_optimality_tolerance(mut self, tolerance: f64) -> Self {
        self.optimality_tolerance = tolerance;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
