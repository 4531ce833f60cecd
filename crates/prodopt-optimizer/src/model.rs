//! 模型建構：產品目錄 + 資源產能 -> 混合整數線性規劃

use std::collections::HashSet;

use prodopt_core::{ProdOptError, Product, Resource};
use rust_decimal::Decimal;
use serde::Serialize;

/// 決策變數（每個產品一個非負整數）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionVariable {
    pub product_id: String,
    pub lower_bound: u64,
    pub upper_bound: Option<u64>,
}

/// 資源產能約束：Σ coefficients[i] * x[i] <= capacity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityConstraint {
    pub resource_id: String,

    /// 依變數順序排列的係數
    pub coefficients: Vec<Decimal>,

    pub capacity: Decimal,
}

impl CapacityConstraint {
    /// 約束左側在指定數量下的值
    pub fn activity(&self, quantities: &[u64]) -> Option<Decimal> {
        self.coefficients
            .iter()
            .zip(quantities)
            .try_fold(Decimal::ZERO, |acc, (coefficient, &quantity)| {
                coefficient
                    .checked_mul(Decimal::from(quantity))
                    .and_then(|term| acc.checked_add(term))
            })
    }

    /// 所有係數皆為 0（約束恆成立）
    pub fn is_trivial(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_zero())
    }
}

/// 模型警告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelWarning {
    pub product_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ModelWarning {
    pub fn new(product_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Info)
    }

    pub fn warning(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 待求解的優化模型
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationModel {
    variables: Vec<DecisionVariable>,
    objective: Vec<Decimal>,
    constraints: Vec<CapacityConstraint>,
    warnings: Vec<ModelWarning>,
}

impl OptimizationModel {
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    /// 目標函數係數（最大化），依變數順序
    pub fn objective(&self) -> &[Decimal] {
        &self.objective
    }

    pub fn constraints(&self) -> &[CapacityConstraint] {
        &self.constraints
    }

    pub fn warnings(&self) -> &[ModelWarning] {
        &self.warnings
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// 精確計算目標值，溢位時回傳 None
    pub fn evaluate_objective(&self, quantities: &[u64]) -> Option<Decimal> {
        self.objective
            .iter()
            .zip(quantities)
            .try_fold(Decimal::ZERO, |acc, (profit, &quantity)| {
                profit
                    .checked_mul(Decimal::from(quantity))
                    .and_then(|term| acc.checked_add(term))
            })
    }

    /// 以十進位精確檢查可行性（含上下界）
    pub fn is_feasible(&self, quantities: &[u64]) -> bool {
        if quantities.len() != self.variables.len() {
            return false;
        }

        let within_bounds = self.variables.iter().zip(quantities).all(|(var, &q)| {
            q >= var.lower_bound && var.upper_bound.map_or(true, |ub| q <= ub)
        });

        within_bounds
            && self.constraints.iter().all(|c| match c.activity(quantities) {
                Some(used) => used <= c.capacity,
                None => false,
            })
    }

    /// 目標可無限增加的產品：正利潤、不耗用任何資源且沒有上限
    pub fn unbounded_products(&self) -> Vec<String> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(i, var)| {
                self.objective[*i] > Decimal::ZERO
                    && var.upper_bound.is_none()
                    && self.constraints.iter().all(|c| c.coefficients[*i].is_zero())
            })
            .map(|(_, var)| var.product_id.clone())
            .collect()
    }
}

/// 模型建構器
pub struct ModelBuilder;

impl ModelBuilder {
    /// 建立優化模型
    ///
    /// 變數依產品順序、約束依資源順序排列。
    pub fn build(
        products: &[Product],
        resources: &[Resource],
    ) -> prodopt_core::Result<OptimizationModel> {
        Self::validate(products, resources)?;

        let variables = products
            .iter()
            .map(|p| DecisionVariable {
                product_id: p.id.clone(),
                lower_bound: p.minimum_quantity.unwrap_or(0),
                upper_bound: p.maximum_quantity,
            })
            .collect();

        let objective = products.iter().map(|p| p.profit).collect();

        let constraints = resources
            .iter()
            .map(|r| CapacityConstraint {
                resource_id: r.id.clone(),
                coefficients: products.iter().map(|p| p.consumption_of(&r.id)).collect(),
                capacity: r.capacity,
            })
            .collect();

        let warnings = Self::collect_warnings(products);
        for warning in &warnings {
            match warning.severity {
                WarningSeverity::Warning => {
                    tracing::warn!("產品 {}: {}", warning.product_id, warning.message)
                }
                WarningSeverity::Info => {
                    tracing::debug!("產品 {}: {}", warning.product_id, warning.message)
                }
            }
        }

        Ok(OptimizationModel {
            variables,
            objective,
            constraints,
            warnings,
        })
    }

    fn validate(products: &[Product], resources: &[Resource]) -> prodopt_core::Result<()> {
        if products.is_empty() {
            return Err(ProdOptError::invalid_model("products", "至少需要一個產品"));
        }
        if resources.is_empty() {
            return Err(ProdOptError::invalid_model("resources", "至少需要一個資源"));
        }

        let mut resource_ids = HashSet::new();
        for (index, resource) in resources.iter().enumerate() {
            if resource.id.is_empty() {
                return Err(ProdOptError::invalid_model(
                    format!("resources[{}].id", index),
                    "資源ID不可為空",
                ));
            }
            if !resource_ids.insert(resource.id.as_str()) {
                return Err(ProdOptError::invalid_model(
                    format!("resources[{}].id", resource.id),
                    "資源ID重複",
                ));
            }
            if resource.capacity < Decimal::ZERO {
                return Err(ProdOptError::invalid_model(
                    format!("resources[{}].capacity", resource.id),
                    format!("產能不可為負: {}", resource.capacity),
                ));
            }
        }

        let mut product_ids = HashSet::new();
        for (index, product) in products.iter().enumerate() {
            if product.id.is_empty() {
                return Err(ProdOptError::invalid_model(
                    format!("products[{}].id", index),
                    "產品ID不可為空",
                ));
            }
            if !product_ids.insert(product.id.as_str()) {
                return Err(ProdOptError::invalid_model(
                    format!("products[{}].id", product.id),
                    "產品ID重複",
                ));
            }
            if product.profit < Decimal::ZERO {
                return Err(ProdOptError::invalid_model(
                    format!("products[{}].profit", product.id),
                    format!("利潤不可為負: {}", product.profit),
                ));
            }
            for (resource_id, rate) in &product.consumption {
                let field = format!("products[{}].consumption[{}]", product.id, resource_id);
                if !resource_ids.contains(resource_id.as_str()) {
                    return Err(ProdOptError::invalid_model(field, "引用了不存在的資源"));
                }
                if *rate < Decimal::ZERO {
                    return Err(ProdOptError::invalid_model(field, format!("耗用量不可為負: {}", rate)));
                }
            }
            if let (Some(min), Some(max)) = (product.minimum_quantity, product.maximum_quantity) {
                if min > max {
                    return Err(ProdOptError::invalid_model(
                        format!("products[{}].minimum_quantity", product.id),
                        format!("最低生產量 {} 大於最高生產量 {}", min, max),
                    ));
                }
            }
        }

        Ok(())
    }

    fn collect_warnings(products: &[Product]) -> Vec<ModelWarning> {
        let mut warnings = Vec::new();

        for product in products {
            if product.profit.is_zero() {
                warnings.push(ModelWarning::info(
                    product.id.clone(),
                    "利潤為 0，不會改善目標值".to_string(),
                ));
            } else if !product.consumes_any() && product.maximum_quantity.is_none() {
                warnings.push(ModelWarning::warning(
                    product.id.clone(),
                    "不耗用任何資源且沒有生產上限，目標值無上界".to_string(),
                ));
            }
        }

        warnings
    }
}
