//! 集成測試

use prodopt::{
    optimize_production, optimize_production_with, ProdOptError, Product, ProductionPlan,
    Resource, ScenarioConfig, SolveResult, SolverConfig,
};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

fn garment_products() -> Vec<Product> {
    vec![
        Product::new("shirt".to_string(), Decimal::new(33, 1))
            .with_consumption("machine".to_string(), Decimal::new(13, 1))
            .with_consumption("worker".to_string(), Decimal::new(25, 1)),
        Product::new("pant".to_string(), Decimal::new(49, 1))
            .with_consumption("machine".to_string(), Decimal::new(23, 1))
            .with_consumption("worker".to_string(), Decimal::new(31, 1)),
        Product::new("short".to_string(), Decimal::new(40, 1))
            .with_consumption("machine".to_string(), Decimal::new(18, 1))
            .with_consumption("worker".to_string(), Decimal::new(27, 1)),
    ]
}

fn garment_resources(machines: i64, workers: i64) -> Vec<Resource> {
    let minutes = Decimal::from(240);
    vec![
        Resource::from_units("machine".to_string(), Decimal::from(machines), minutes).unwrap(),
        Resource::from_units("worker".to_string(), Decimal::from(workers), minutes).unwrap(),
    ]
}

fn expected_profit(products: &[Product], plan: &ProductionPlan) -> Decimal {
    products
        .iter()
        .map(|p| p.profit * Decimal::from(plan.quantity(&p.id)))
        .sum()
}

/// 窮舉所有可行整數組合的最大利潤（僅適用於每個產品都有正耗用的小型實例）
fn brute_force_best(products: &[Product], resources: &[Resource]) -> Decimal {
    let limits: Vec<u64> = products
        .iter()
        .map(|p| {
            resources
                .iter()
                .filter(|r| p.consumption_of(&r.id) > Decimal::ZERO)
                .map(|r| (r.capacity / p.consumption_of(&r.id)).floor())
                .min()
                .and_then(|limit| limit.to_u64())
                .unwrap_or(0)
        })
        .collect();

    let mut best = Decimal::ZERO;
    let mut quantities = vec![0u64; products.len()];
    loop {
        let fits = resources.iter().all(|r| {
            let used: Decimal = products
                .iter()
                .zip(&quantities)
                .map(|(p, &q)| p.consumption_of(&r.id) * Decimal::from(q))
                .sum();
            used <= r.capacity
        });
        if fits {
            let profit: Decimal = products
                .iter()
                .zip(&quantities)
                .map(|(p, &q)| p.profit * Decimal::from(q))
                .sum();
            best = best.max(profit);
        }

        // 下一個組合（里程表式遞增）
        let mut index = 0;
        loop {
            if index == quantities.len() {
                return best;
            }
            if quantities[index] < limits[index] {
                quantities[index] += 1;
                break;
            }
            quantities[index] = 0;
            index += 1;
        }
    }
}

#[test]
fn test_garment_factory_scenario() {
    let products = garment_products();
    let resources = garment_resources(4, 6);

    let result = optimize_production(&resources, &products).unwrap();
    let plan = result.plan().expect("garment scenario should be optimal");

    assert!(plan.fits_capacity(&products, &resources));
    assert_eq!(plan.total_profit, expected_profit(&products, plan));

    // (195, 307, 0) 可行，利潤 2147.8；LP 上界約 2148.84
    assert!(plan.total_profit >= Decimal::new(21478, 1));
    assert!(plan.total_profit <= Decimal::from(2149));
}

#[test]
fn test_garment_scenario_from_json() {
    let json = include_str!("../demos/garment_factory.json");
    let scenario = ScenarioConfig::from_json(json).unwrap();
    let resources = scenario.build_resources().unwrap();

    let from_json = optimize_production(&resources, &scenario.products).unwrap();
    let from_code = optimize_production(&garment_resources(4, 6), &garment_products()).unwrap();

    assert_eq!(from_json, from_code);
}

#[test]
fn test_monthly_scenario_honours_bounds() {
    let json = include_str!("../demos/monthly_lines.json");
    let mut scenario = ScenarioConfig::from_json(json).unwrap();
    let resources = scenario.build_resources().unwrap();

    let plan = optimize_production(&resources, &scenario.products)
        .unwrap()
        .into_plan()
        .unwrap();

    assert!(plan.fits_capacity(&scenario.products, &resources));
    assert!(plan.quantity("short") >= 5);
    assert!(plan.quantity("pant") <= 20);

    // 最低產量超過產能即不可行
    scenario.products[2].minimum_quantity = Some(100);
    let result = optimize_production(&resources, &scenario.products).unwrap();
    assert_eq!(result, SolveResult::Infeasible);
}

#[test]
fn test_scenario_capacity_overflow() {
    let json = r#"{
        "name": "huge",
        "resources": [{
            "id": "machine",
            "units_available": "79228162514264337593543950335",
            "time_per_unit": "240"
        }],
        "products": []
    }"#;
    let scenario = ScenarioConfig::from_json(json).unwrap();

    let err = scenario.build_resources().unwrap_err();

    assert!(matches!(err, ProdOptError::InvalidModel { .. }));
    assert_eq!(err.field(), Some("resources[machine].units_available"));
}

#[test]
fn test_capacity_just_below_whole_number() {
    // 產能精確值略小於整數，浮點下看似剛好用滿
    let products = vec![
        Product::new("a".to_string(), Decimal::from(3))
            .with_consumption("machine".to_string(), Decimal::from(2)),
        Product::new("b".to_string(), Decimal::ONE)
            .with_consumption("machine".to_string(), Decimal::ONE),
    ];
    let capacity: Decimal = "9.99999999999999999".parse().unwrap();
    let resources = vec![Resource::new("machine".to_string(), capacity)];

    let plan = optimize_production(&resources, &products)
        .unwrap()
        .into_plan()
        .unwrap();

    assert!(plan.fits_capacity(&products, &resources));
    assert_eq!(plan.total_profit, Decimal::from(13));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_zero_capacity_produces_nothing(#[case] product_count: usize) {
    let products: Vec<Product> = garment_products().into_iter().take(product_count).collect();
    let resources = garment_resources(0, 0);

    let plan = optimize_production(&resources, &products)
        .unwrap()
        .into_plan()
        .expect("producing nothing is always feasible");

    assert!(plan.is_idle());
    assert_eq!(plan.total_profit, Decimal::ZERO);
}

#[test]
fn test_free_product_is_unbounded() {
    let mut products = garment_products();
    products.push(Product::new("gift".to_string(), Decimal::from(2)));

    let result = optimize_production(&garment_resources(4, 6), &products).unwrap();

    assert_eq!(
        result,
        SolveResult::Unbounded {
            product_ids: vec!["gift".to_string()]
        }
    );
}

#[test]
fn test_free_product_with_explicit_zero_consumption_is_unbounded() {
    let mut products = garment_products();
    products.push(
        Product::new("gift".to_string(), Decimal::from(2))
            .with_consumption("machine".to_string(), Decimal::ZERO)
            .with_consumption("worker".to_string(), Decimal::ZERO),
    );

    let result = optimize_production(&garment_resources(4, 6), &products).unwrap();

    assert!(matches!(result, SolveResult::Unbounded { .. }));
}

#[test]
fn test_dangling_resource_reference() {
    let products = vec![Product::new("shirt".to_string(), Decimal::ONE)
        .with_consumption("dye".to_string(), Decimal::ONE)];

    let err = optimize_production(&garment_resources(4, 6), &products).unwrap_err();

    assert_eq!(err.field(), Some("products[shirt].consumption[dye]"));
}

#[test]
fn test_time_budget_reports_timeout() {
    let config = SolverConfig::default().with_time_limit_ms(0);

    let result =
        optimize_production_with(&garment_resources(4, 6), &garment_products(), &config).unwrap();

    assert!(matches!(result, SolveResult::SolverTimeout { .. }));
}

#[test]
fn test_concurrent_calls_agree() {
    let products = garment_products();
    let resources = garment_resources(5, 8);
    let expected = optimize_production(&resources, &products).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| optimize_production(&resources, &products).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// 小型隨機實例：1-3 個產品、1-2 個資源，耗用量皆為正
fn small_instance() -> impl Strategy<Value = (Vec<Product>, Vec<Resource>)> {
    (1usize..=3, 1usize..=2).prop_flat_map(|(product_count, resource_count)| {
        (
            prop::collection::vec(
                (0i64..=90, prop::collection::vec(5i64..=40, resource_count)),
                product_count,
            ),
            prop::collection::vec(0i64..=20, resource_count),
        )
            .prop_map(move |(product_specs, capacities)| {
                let resources: Vec<Resource> = capacities
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| Resource::new(format!("r{}", i), Decimal::from(c)))
                    .collect();
                let products = product_specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (profit, rates))| {
                        rates.into_iter().enumerate().fold(
                            Product::new(format!("p{}", i), Decimal::new(profit, 1)),
                            |product, (r, rate)| {
                                product.with_consumption(format!("r{}", r), Decimal::new(rate, 1))
                            },
                        )
                    })
                    .collect();
                (products, resources)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_optimal_plans_are_feasible((products, resources) in small_instance()) {
        let result = optimize_production(&resources, &products).unwrap();
        let plan = result.plan().expect("positive consumption keeps the model bounded");

        for usage in plan.resource_usage(&products, &resources) {
            prop_assert!(usage.used <= usage.capacity + Decimal::new(1, 6));
        }
        prop_assert_eq!(plan.total_profit, expected_profit(&products, plan));
    }

    #[test]
    fn prop_matches_brute_force((products, resources) in small_instance()) {
        let plan = optimize_production(&resources, &products)
            .unwrap()
            .into_plan()
            .unwrap();

        prop_assert_eq!(plan.total_profit, brute_force_best(&products, &resources));
    }

    #[test]
    fn prop_more_capacity_never_hurts(
        (products, resources) in small_instance(),
        extra in 1i64..=10,
        pick in 0usize..2,
    ) {
        let before = optimize_production(&resources, &products)
            .unwrap()
            .into_plan()
            .unwrap();

        let mut enlarged = resources.clone();
        let index = pick % enlarged.len();
        enlarged[index].capacity += Decimal::from(extra);

        let after = optimize_production(&enlarged, &products)
            .unwrap()
            .into_plan()
            .unwrap();

        prop_assert!(after.total_profit >= before.total_profit);
    }
}
