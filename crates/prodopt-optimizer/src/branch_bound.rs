//! 分支定界求解
//!
//! LP 鬆弛交給 good_lp + microlp（純 Rust）求解，整數性由深度優先的
//! 分支定界處理。每個整數候選解都以十進位精確地重新檢查可行性，
//! 浮點誤差不會讓不可行的計劃被接受。

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use good_lp::{
    constraint, microlp, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable,
};
use prodopt_core::{ProdOptError, ProductionPlan, SolverConfig};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::model::OptimizationModel;
use crate::solver::{MilpBackend, SolveResult};

/// 預設的 MILP 後端
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl MilpBackend for BranchAndBound {
    fn name(&self) -> &'static str {
        "branch-and-bound/microlp"
    }

    fn solve(
        &self,
        model: &OptimizationModel,
        config: &SolverConfig,
    ) -> prodopt_core::Result<SolveResult> {
        Search::new(model, config).run()
    }
}

/// 搜尋樹節點：各變數的整數上下界
#[derive(Debug, Clone)]
struct Node {
    lower: Vec<u64>,
    upper: Vec<Option<u64>>,
}

impl Node {
    /// 限制 x[index] <= value，界限矛盾時回傳 None
    fn with_upper(&self, index: usize, value: u64) -> Option<Node> {
        if value < self.lower[index] {
            return None;
        }
        let mut child = self.clone();
        child.upper[index] = Some(value);
        Some(child)
    }

    /// 限制 x[index] >= value，界限矛盾時回傳 None
    fn with_lower(&self, index: usize, value: u64) -> Option<Node> {
        if self.upper[index].map_or(false, |ub| value > ub) {
            return None;
        }
        let mut child = self.clone();
        child.lower[index] = value;
        Some(child)
    }

    fn clamp(&self, index: usize, value: u64) -> u64 {
        let value = value.max(self.lower[index]);
        match self.upper[index] {
            Some(ub) => value.min(ub),
            None => value,
        }
    }
}

enum Relaxation {
    Solved { values: Vec<f64>, bound: f64 },
    Infeasible,
    Unbounded,
}

struct Incumbent {
    quantities: Vec<u64>,
    objective: Decimal,
}

struct Search<'a> {
    model: &'a OptimizationModel,
    config: &'a SolverConfig,
    objective: Vec<f64>,
    rows: Vec<(Vec<f64>, f64)>,
    incumbent: Option<Incumbent>,
    nodes_explored: usize,
    started: Instant,
    deadline: Option<Instant>,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::MAX)
}

impl<'a> Search<'a> {
    fn new(model: &'a OptimizationModel, config: &'a SolverConfig) -> Self {
        let started = Instant::now();
        let rows = model
            .constraints()
            .iter()
            .filter(|c| !c.is_trivial())
            .map(|c| (c.coefficients.iter().copied().map(to_f64).collect(), to_f64(c.capacity)))
            .collect();

        Self {
            model,
            config,
            objective: model.objective().iter().copied().map(to_f64).collect(),
            rows,
            incumbent: None,
            nodes_explored: 0,
            started,
            deadline: config
                .time_limit_ms
                .map(|ms| started + Duration::from_millis(ms)),
        }
    }

    fn run(mut self) -> prodopt_core::Result<SolveResult> {
        let root = Node {
            lower: self.model.variables().iter().map(|v| v.lower_bound).collect(),
            upper: self.model.variables().iter().map(|v| v.upper_bound).collect(),
        };

        // 下界本身（通常是全 0）若可行即為初始解
        self.try_candidate(&root.lower)?;

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.budget_exhausted() {
                tracing::debug!(
                    "分支定界逾時：已探索 {} 個節點，剩餘 {} 個",
                    self.nodes_explored,
                    stack.len() + 1
                );
                return Ok(SolveResult::SolverTimeout {
                    nodes_explored: self.nodes_explored,
                    elapsed_ms: self.started.elapsed().as_millis(),
                });
            }
            self.nodes_explored += 1;

            let (values, bound) = match self.relax(&node)? {
                Relaxation::Solved { values, bound } => (values, bound),
                Relaxation::Infeasible => continue,
                Relaxation::Unbounded => {
                    return Ok(SolveResult::Unbounded {
                        product_ids: self.model.unbounded_products(),
                    })
                }
            };

            if self.is_dominated(bound) {
                continue;
            }

            // 捨去解作為候選（非負係數下通常可行）
            let floored: Vec<u64> = values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let floor = (v + self.config.integrality_tolerance).floor().max(0.0);
                    node.clamp(i, floor as u64)
                })
                .collect();
            self.try_candidate(&floored)?;

            match self.branching_index(&values) {
                Some(index) => {
                    let down = values[index].floor().max(0.0) as u64;
                    if let Some(child) = node.with_upper(index, down) {
                        stack.push(child);
                    }
                    if let Some(child) = node.with_lower(index, down + 1) {
                        stack.push(child);
                    }
                }
                None => {
                    let rounded: Vec<u64> = values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| node.clamp(i, v.round().max(0.0) as u64))
                        .collect();
                    if self.try_candidate(&rounded)? {
                        continue;
                    }

                    // 四捨五入後精確檢查不可行：優先對被進位的變數分支，否則對任一
                    // 高於下界的變數分支。全部等於下界時，節點內任何點的耗用都不小於
                    // 此點，整個節點不可行。
                    let tightenable = |i: &usize| rounded[*i] > node.lower[*i];
                    let index = (0..rounded.len())
                        .filter(tightenable)
                        .find(|&i| rounded[i] as f64 > values[i])
                        .or_else(|| (0..rounded.len()).find(tightenable));
                    if let Some(index) = index {
                        if let Some(child) = node.with_upper(index, rounded[index] - 1) {
                            stack.push(child);
                        }
                        if let Some(child) = node.with_lower(index, rounded[index]) {
                            stack.push(child);
                        }
                    }
                }
            }
        }

        tracing::debug!("分支定界完成：探索 {} 個節點", self.nodes_explored);

        Ok(match self.incumbent.take() {
            Some(incumbent) => SolveResult::Optimal(self.to_plan(incumbent)),
            None => SolveResult::Infeasible,
        })
    }

    fn budget_exhausted(&self) -> bool {
        self.nodes_explored >= self.config.max_nodes
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// 求解節點的 LP 鬆弛
    fn relax(&self, node: &Node) -> prodopt_core::Result<Relaxation> {
        let mut vars = variables!();
        let xs: Vec<Variable> = node
            .lower
            .iter()
            .zip(&node.upper)
            .map(|(&lo, &hi)| {
                let definition = variable().min(lo as f64);
                match hi {
                    Some(hi) => vars.add(definition.max(hi as f64)),
                    None => vars.add(definition),
                }
            })
            .collect();

        let mut objective: Expression = 0.into();
        for (&x, &profit) in xs.iter().zip(&self.objective) {
            objective += x * profit;
        }

        let mut problem = vars.maximise(objective).using(microlp);
        for (row, capacity) in &self.rows {
            let capacity = *capacity;
            let mut usage: Expression = 0.into();
            for (&x, &rate) in xs.iter().zip(row) {
                if rate != 0.0 {
                    usage += x * rate;
                }
            }
            problem = problem.with(constraint!(usage <= capacity));
        }

        let solution = match problem.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => return Ok(Relaxation::Infeasible),
            Err(ResolutionError::Unbounded) => return Ok(Relaxation::Unbounded),
            Err(err) => {
                return Err(ProdOptError::Solver(format!("LP 鬆弛求解失敗: {:?}", err)));
            }
        };

        let values: Vec<f64> = xs.iter().map(|&x| solution.value(x).max(0.0)).collect();
        let bound: f64 = values
            .iter()
            .zip(&self.objective)
            .map(|(v, profit)| v * profit)
            .sum();

        Ok(Relaxation::Solved { values, bound })
    }

    /// 上界不可能優於目前最佳解
    fn is_dominated(&self, bound: f64) -> bool {
        match &self.incumbent {
            Some(incumbent) => {
                let best = to_f64(incumbent.objective);
                bound <= best + self.config.optimality_tolerance * best.abs().max(1.0)
            }
            None => false,
        }
    }

    /// 第一個非整數的變數
    fn branching_index(&self, values: &[f64]) -> Option<usize> {
        values
            .iter()
            .position(|v| (v - v.round()).abs() > self.config.integrality_tolerance)
    }

    /// 精確檢查候選解，可行且更好時更新最佳解；回傳是否可行
    fn try_candidate(&mut self, quantities: &[u64]) -> prodopt_core::Result<bool> {
        if !self.model.is_feasible(quantities) {
            return Ok(false);
        }

        let objective = self
            .model
            .evaluate_objective(quantities)
            .ok_or_else(|| ProdOptError::Solver("目標值計算溢位".to_string()))?;

        let improves = self
            .incumbent
            .as_ref()
            .map_or(true, |incumbent| objective > incumbent.objective);
        if improves {
            tracing::trace!("新的最佳解：目標值 {}，節點 {}", objective, self.nodes_explored);
            self.incumbent = Some(Incumbent {
                quantities: quantities.to_vec(),
                objective,
            });
        }

        Ok(true)
    }

    fn to_plan(&self, incumbent: Incumbent) -> ProductionPlan {
        let quantities: BTreeMap<String, u64> = self
            .model
            .variables()
            .iter()
            .zip(incumbent.quantities)
            .map(|(var, quantity)| (var.product_id.clone(), quantity))
            .collect();

        ProductionPlan::new(quantities, incumbent.objective)
    }
}
