//! # Production Optimizer
//!
//! 生產組合優化引擎的對外入口
//!
//! ```
//! use prodopt::{optimize_production, Product, Resource};
//! use rust_decimal::Decimal;
//!
//! let resources = vec![Resource::new("machine".to_string(), Decimal::from(10))];
//! let products = vec![Product::new("shirt".to_string(), Decimal::from(3))
//!     .with_consumption("machine".to_string(), Decimal::from(2))];
//!
//! let plan = optimize_production(&resources, &products)?.into_plan().unwrap();
//! assert_eq!(plan.quantity("shirt"), 5);
//! # Ok::<(), prodopt::ProdOptError>(())
//! ```

pub use prodopt_core::*;
pub use prodopt_optimizer::{
    optimize_production, optimize_production_with, sweep_capacity, BranchAndBound, MilpBackend,
    ModelBuilder, ModelWarning, OptimizationModel, SolveResult, SolverAdapter, SweepPoint,
    WarningSeverity,
};
