//! # Production Optimizer
//!
//! 資源受限的生產組合優化：模型建構 + MILP 求解

pub mod branch_bound;
pub mod model;
pub mod solver;
pub mod sweep;

// Re-export 主要類型
pub use branch_bound::BranchAndBound;
pub use model::{ModelBuilder, ModelWarning, OptimizationModel, WarningSeverity};
pub use solver::{MilpBackend, SolveResult, SolverAdapter};
pub use sweep::{sweep_capacity, SweepPoint};

use prodopt_core::{Product, Resource, SolverConfig};

/// 以預設求解器配置計算最優生產組合
///
/// 純函數：每次呼叫自行建立模型，不保留任何狀態。
pub fn optimize_production(
    resources: &[Resource],
    products: &[Product],
) -> prodopt_core::Result<SolveResult> {
    optimize_production_with(resources, products, &SolverConfig::default())
}

/// 以指定求解器配置計算最優生產組合
pub fn optimize_production_with(
    resources: &[Resource],
    products: &[Product],
    config: &SolverConfig,
) -> prodopt_core::Result<SolveResult> {
    tracing::info!(
        "開始生產優化：產品 {} 項，資源 {} 項",
        products.len(),
        resources.len()
    );

    let start_time = std::time::Instant::now();

    let model = ModelBuilder::build(products, resources)?;
    let result = SolverAdapter::new(config.clone()).solve(&model)?;

    match &result {
        SolveResult::Optimal(plan) => tracing::info!(
            "生產優化完成，耗時 {:?}，總利潤 {}",
            start_time.elapsed(),
            plan.total_profit
        ),
        other => tracing::info!(
            "生產優化結束，耗時 {:?}，狀態 {}",
            start_time.elapsed(),
            other.status()
        ),
    }

    Ok(result)
}
