//! 成衣工廠生產優化示例

use prodopt::{
    optimize_production, sweep_capacity, Product, ScenarioConfig, SolveResult, SolverConfig,
};
use rust_decimal::Decimal;

/// 各產品對某資源的最小正耗用量（無人耗用時為 None）
fn min_positive_rate(products: &[Product], resource_id: &str) -> Option<Decimal> {
    products
        .iter()
        .map(|product| product.consumption_of(resource_id))
        .filter(|rate| *rate > Decimal::ZERO)
        .min()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 成衣工廠生產優化示例 ===\n");

    let mut scenario = ScenarioConfig::from_json(include_str!("garment_factory.json"))?;
    let resources = scenario.build_resources()?;

    println!("情境: {}", scenario.name);
    for resource in &resources {
        println!("  - 資源: {}, 產能: {}", resource.id, resource.capacity);
    }

    match optimize_production(&resources, &scenario.products)? {
        SolveResult::Optimal(plan) => {
            println!("\n最優生產計劃:");
            for (product_id, quantity) in &plan.quantities {
                println!("  - {}: {}", product_id, quantity);
            }
            println!("總利潤: ${}", plan.total_profit);

            println!("\n資源使用:");
            for usage in plan.resource_usage(&scenario.products, &resources) {
                let binding = min_positive_rate(&scenario.products, &usage.resource_id)
                    .is_some_and(|rate| usage.is_binding(rate));
                println!(
                    "  - {}: {} / {}（剩餘 {}）{}",
                    usage.resource_id,
                    usage.used,
                    usage.capacity,
                    usage.slack(),
                    if binding { " [瓶頸]" } else { "" }
                );
            }
        }
        other => println!("\n無最優解，狀態: {}", other.status()),
    }

    // 機台數 4-6 台（每台 240 分鐘）
    let capacities: Vec<Decimal> = (4..=6).map(|machines| Decimal::from(machines * 240)).collect();
    let points = sweep_capacity(
        &scenario.products,
        &resources,
        "machine",
        &capacities,
        &SolverConfig::default(),
    )?;

    println!("\n機台產能掃描:");
    for point in points {
        match point.total_profit() {
            Some(profit) => println!("  - 產能 {}: 利潤 ${}", point.capacity, profit),
            None => println!("  - 產能 {}: {}", point.capacity, point.result.status()),
        }
    }

    // 工人數 5-7 人，由情境重新換算產能
    println!("\n工人數調整:");
    for workers in 5..=7 {
        scenario.set_units_available("worker", Decimal::from(workers));
        let resources = scenario.build_resources()?;
        match optimize_production(&resources, &scenario.products)?.into_plan() {
            Some(plan) => println!("  - 工人 {} 人: 利潤 ${}", workers, plan.total_profit),
            None => println!("  - 工人 {} 人: 無最優解", workers),
        }
    }

    Ok(())
}
