//! 產能掃描：對單一資源的多個產能值平行求解

use prodopt_core::{ProdOptError, Product, Resource, SolverConfig};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::solver::SolveResult;

/// 掃描中的一個點
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub capacity: Decimal,
    pub result: SolveResult,
}

impl SweepPoint {
    /// 該點的最優利潤（非最優結果回傳 None）
    pub fn total_profit(&self) -> Option<Decimal> {
        self.result.plan().map(|plan| plan.total_profit)
    }
}

/// 以不同產能重新求解，結果依輸入順序排列
///
/// 每個點各自建立模型，點與點之間不共享可變狀態。
pub fn sweep_capacity(
    products: &[Product],
    resources: &[Resource],
    resource_id: &str,
    capacities: &[Decimal],
    config: &SolverConfig,
) -> prodopt_core::Result<Vec<SweepPoint>> {
    let position = resources
        .iter()
        .position(|r| r.id == resource_id)
        .ok_or_else(|| {
            ProdOptError::invalid_model(format!("resources[{}]", resource_id), "掃描的資源不存在")
        })?;

    tracing::info!(
        "開始產能掃描：資源 {}，共 {} 個產能值",
        resource_id,
        capacities.len()
    );

    capacities
        .par_iter()
        .map(|&capacity| {
            let mut scenario = resources.to_vec();
            scenario[position].capacity = capacity;

            crate::optimize_production_with(&scenario, products, config)
                .map(|result| SweepPoint { capacity, result })
        })
        .collect()
}
