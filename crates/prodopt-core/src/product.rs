//! 產品模型

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 可生產的產品（單位利潤 + 各資源的單位耗用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: String,

    /// 單位利潤
    pub profit: Decimal,

    /// 單位資源耗用（資源ID -> 耗用量），未列出的資源視為 0
    #[serde(default)]
    pub consumption: BTreeMap<String, Decimal>,

    /// 最低生產量
    #[serde(default)]
    pub minimum_quantity: Option<u64>,

    /// 最高生產量
    #[serde(default)]
    pub maximum_quantity: Option<u64>,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: String, profit: Decimal) -> Self {
        Self {
            id,
            profit,
            consumption: BTreeMap::new(),
            minimum_quantity: None,
            maximum_quantity: None,
        }
    }

    /// 建構器模式：設置單位資源耗用
    pub fn with_consumption(mut self, resource_id: String, rate: Decimal) -> Self {
        self.consumption.insert(resource_id, rate);
        self
    }

    /// 建構器模式：設置最低生產量
    pub fn with_minimum_quantity(mut self, quantity: u64) -> Self {
        self.minimum_quantity = Some(quantity);
        self
    }

    /// 建構器模式：設置最高生產量
    pub fn with_maximum_quantity(mut self, quantity: u64) -> Self {
        self.maximum_quantity = Some(quantity);
        self
    }

    /// 取得對某資源的單位耗用
    pub fn consumption_of(&self, resource_id: &str) -> Decimal {
        self.consumption
            .get(resource_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// 是否至少耗用一種資源
    pub fn consumes_any(&self) -> bool {
        self.consumption.values().any(|rate| *rate > Decimal::ZERO)
    }

    /// 指定數量的利潤，溢位時回傳 None
    pub fn profit_for(&self, quantity: u64) -> Option<Decimal> {
        self.profit.checked_mul(Decimal::from(quantity))
    }
}
