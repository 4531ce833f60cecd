//! 資源模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ProdOptError;

/// 共用的有限生產資源（機台時間、人力時間等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// 資源ID
    pub id: String,

    /// 計劃期間內的總產能（已換算好的純量）
    pub capacity: Decimal,
}

impl Resource {
    /// 創建新的資源
    pub fn new(id: String, capacity: Decimal) -> Self {
        Self { id, capacity }
    }

    /// 由「可用單位數 × 每單位時間」換算產能
    ///
    /// 倍數屬於情境政策（例如每台機器 240 分鐘、每月 30 天），
    /// 由呼叫端決定，核心不做任何假設。乘積溢位時回傳
    /// `resources[<id>].units_available` 欄位的模型錯誤。
    ///
    /// # 範例
    /// ```
    /// # use prodopt_core::Resource;
    /// # use rust_decimal::Decimal;
    /// let machine =
    ///     Resource::from_units("machine".to_string(), Decimal::from(4), Decimal::from(240))?;
    /// assert_eq!(machine.capacity, Decimal::from(960));
    /// # Ok::<(), prodopt_core::ProdOptError>(())
    /// ```
    pub fn from_units(
        id: String,
        units_available: Decimal,
        time_per_unit: Decimal,
    ) -> crate::Result<Self> {
        let capacity = units_available.checked_mul(time_per_unit).ok_or_else(|| {
            ProdOptError::invalid_model(
                format!("resources[{}].units_available", id),
                "產能換算溢位",
            )
        })?;
        Ok(Self::new(id, capacity))
    }
}
