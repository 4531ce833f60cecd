//! 情境設定（資源規格 + 產品目錄）
//!
//! 產能倍數（每台機器 240 分鐘、每月 30 天、或直接使用輸入值）
//! 屬於情境設定，在此換算成 [`Resource`] 的產能純量。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Product, Resource};

fn default_time_per_unit() -> Decimal {
    Decimal::ONE
}

/// 資源規格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// 資源ID
    pub id: String,

    /// 可用單位數（機台數、工人數等）
    pub units_available: Decimal,

    /// 每單位在計劃期間內可提供的時間，預設為 1（直接使用可用單位數）
    #[serde(default = "default_time_per_unit")]
    pub time_per_unit: Decimal,
}

impl ResourceSpec {
    pub fn new(id: String, units_available: Decimal, time_per_unit: Decimal) -> Self {
        Self {
            id,
            units_available,
            time_per_unit,
        }
    }

    /// 換算為資源
    pub fn to_resource(&self) -> crate::Result<Resource> {
        Resource::from_units(self.id.clone(), self.units_available, self.time_per_unit)
    }
}

/// 優化情境
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// 情境名稱
    pub name: String,

    /// 資源規格（依輸入順序）
    pub resources: Vec<ResourceSpec>,

    /// 產品目錄（依輸入順序）
    pub products: Vec<Product>,
}

impl ScenarioConfig {
    /// 創建新的情境
    pub fn new(name: String) -> Self {
        Self {
            name,
            resources: Vec::new(),
            products: Vec::new(),
        }
    }

    /// 從 JSON 解析情境
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：加入資源規格
    pub fn with_resource(mut self, spec: ResourceSpec) -> Self {
        self.resources.push(spec);
        self
    }

    /// 建構器模式：加入產品
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// 換算所有資源的產能，任一資源溢位即回傳錯誤
    pub fn build_resources(&self) -> crate::Result<Vec<Resource>> {
        self.resources.iter().map(ResourceSpec::to_resource).collect()
    }

    /// 調整某資源的可用單位數（例如拉桿改變機台數），找不到時回傳 false
    pub fn set_units_available(&mut self, resource_id: &str, units: Decimal) -> bool {
        match self.resources.iter_mut().find(|spec| spec.id == resource_id) {
            Some(spec) => {
                spec.units_available = units;
                true
            }
            None => false,
        }
    }
}
