//! # Production Optimizer Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod plan;
pub mod product;
pub mod resource;
pub mod scenario;

// Re-export 主要類型
pub use config::SolverConfig;
pub use plan::{ProductionPlan, ResourceUsage};
pub use product::Product;
pub use resource::Resource;
pub use scenario::{ResourceSpec, ScenarioConfig};

/// 生產優化錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ProdOptError {
    /// 輸入模型不合法（負係數、懸空的資源引用、空清單等）
    #[error("無效的模型欄位 {field}: {reason}")]
    InvalidModel { field: String, reason: String },

    #[error("情境設定解析錯誤: {0}")]
    Config(#[from] serde_json::Error),

    #[error("求解器錯誤: {0}")]
    Solver(String),
}

impl ProdOptError {
    /// 建立模型驗證錯誤
    pub fn invalid_model(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 取得出錯欄位名稱（僅限模型驗證錯誤）
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidModel { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProdOptError>;
