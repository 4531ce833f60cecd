//! 生產計劃模型（優化結果）

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Product, Resource};

/// 生產計劃
///
/// 每次優化呼叫建立一次，之後不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlan {
    /// 各產品的生產數量
    pub quantities: BTreeMap<String, u64>,

    /// 實現的總利潤
    pub total_profit: Decimal,
}

impl ProductionPlan {
    /// 創建新的生產計劃
    pub fn new(quantities: BTreeMap<String, u64>, total_profit: Decimal) -> Self {
        Self {
            quantities,
            total_profit,
        }
    }

    /// 取得某產品的生產數量（未列出時為 0）
    pub fn quantity(&self, product_id: &str) -> u64 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    /// 總生產件數
    pub fn total_units(&self) -> u64 {
        self.quantities.values().sum()
    }

    /// 計劃是否什麼都不生產
    pub fn is_idle(&self) -> bool {
        self.total_units() == 0
    }

    /// 計算計劃對某資源的總耗用
    pub fn usage_of(&self, products: &[Product], resource_id: &str) -> Decimal {
        products
            .iter()
            .map(|p| p.consumption_of(resource_id) * Decimal::from(self.quantity(&p.id)))
            .sum()
    }

    /// 各資源的使用狀況（依資源輸入順序）
    pub fn resource_usage(
        &self,
        products: &[Product],
        resources: &[Resource],
    ) -> Vec<ResourceUsage> {
        resources
            .iter()
            .map(|r| ResourceUsage::new(r.id.clone(), self.usage_of(products, &r.id), r.capacity))
            .collect()
    }

    /// 檢查計劃是否在所有資源產能內
    pub fn fits_capacity(&self, products: &[Product], resources: &[Resource]) -> bool {
        self.resource_usage(products, resources)
            .iter()
            .all(|usage| usage.used <= usage.capacity)
    }
}

/// 單一資源的使用狀況
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub resource_id: String,
    pub used: Decimal,
    pub capacity: Decimal,
}

impl ResourceUsage {
    pub fn new(resource_id: String, used: Decimal, capacity: Decimal) -> Self {
        Self {
            resource_id,
            used,
            capacity,
        }
    }

    /// 剩餘產能
    pub fn slack(&self) -> Decimal {
        self.capacity - self.used
    }

    /// 使用率（0-1），產能為 0 時回傳 None
    pub fn utilization(&self) -> Option<Decimal> {
        if self.capacity.is_zero() {
            None
        } else {
            Some(self.used / self.capacity)
        }
    }

    /// 是否為瓶頸資源（剩餘產能不足以再多耗用 `min_rate`）
    pub fn is_binding(&self, min_rate: Decimal) -> bool {
        self.slack() < min_rate
    }
}
