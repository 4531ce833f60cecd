//! 求解器介面與結果

use prodopt_core::{ProdOptError, ProductionPlan, SolverConfig};
use serde::Serialize;

use crate::branch_bound::BranchAndBound;
use crate::model::OptimizationModel;

/// 求解結果
///
/// 不可行、無界、逾時都是正常的優化結果，不是錯誤。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SolveResult {
    /// 找到可證明最優的整數解
    Optimal(ProductionPlan),

    /// 沒有任何數量組合滿足所有約束
    Infeasible,

    /// 目標可無限增加
    Unbounded {
        /// 造成無界的產品
        product_ids: Vec<String>,
    },

    /// 在節點或時間預算內未能證明最優
    SolverTimeout { nodes_explored: usize, elapsed_ms: u128 },
}

impl SolveResult {
    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal(_))
    }

    /// 取得最優計劃
    pub fn plan(&self) -> Option<&ProductionPlan> {
        match self {
            Self::Optimal(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn into_plan(self) -> Option<ProductionPlan> {
        match self {
            Self::Optimal(plan) => Some(plan),
            _ => None,
        }
    }

    /// 結果狀態名稱（供日誌與 UI 顯示）
    pub fn status(&self) -> &'static str {
        match self {
            Self::Optimal(_) => "optimal",
            Self::Infeasible => "infeasible",
            Self::Unbounded { .. } => "unbounded",
            Self::SolverTimeout { .. } => "timeout",
        }
    }
}

/// MILP 求解後端
///
/// 後端只需支援整數變數、線性目標最大化與線性 <= 約束。
/// 同樣的輸入必須得到同樣的結果。
pub trait MilpBackend {
    /// 後端名稱
    fn name(&self) -> &'static str;

    /// 求解模型
    fn solve(
        &self,
        model: &OptimizationModel,
        config: &SolverConfig,
    ) -> prodopt_core::Result<SolveResult>;
}

/// 求解器轉接層：呼叫後端並驗證結果
pub struct SolverAdapter<B = BranchAndBound> {
    backend: B,
    config: SolverConfig,
}

impl SolverAdapter<BranchAndBound> {
    /// 使用預設的分支定界後端
    pub fn new(config: SolverConfig) -> Self {
        Self::with_backend(BranchAndBound, config)
    }
}

impl Default for SolverAdapter<BranchAndBound> {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<B: MilpBackend> SolverAdapter<B> {
    /// 使用自訂後端
    pub fn with_backend(backend: B, config: SolverConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 求解模型
    pub fn solve(&self, model: &OptimizationModel) -> prodopt_core::Result<SolveResult> {
        tracing::debug!(
            "使用 {} 求解：變數 {} 個，約束 {} 條",
            self.backend.name(),
            model.num_variables(),
            model.constraints().len()
        );

        let result = self.backend.solve(model, &self.config)?;

        match result {
            SolveResult::Optimal(plan) => {
                let quantities = model
                    .variables()
                    .iter()
                    .map(|var| plan.quantity(&var.product_id))
                    .collect::<Vec<_>>();

                if !model.is_feasible(&quantities) {
                    return Err(ProdOptError::Solver(format!(
                        "後端 {} 回傳的計劃違反約束",
                        self.backend.name()
                    )));
                }

                Ok(SolveResult::Optimal(plan))
            }
            SolveResult::Unbounded { product_ids } if product_ids.is_empty() => {
                Ok(SolveResult::Unbounded {
                    product_ids: model.unbounded_products(),
                })
            }
            other => Ok(other),
        }
    }
}
