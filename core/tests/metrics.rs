//! KPI metrics tests.

use shopdash_core::{
    metrics::DashboardMetrics,
    model::{Category, MonthlyStat, Product, Sale, SaleStatus},
    store::EntityStore,
};

fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        brand: "SoleMax".into(),
        category: Category::Running,
        price: 100.0,
        cost: 60.0,
        stock: 10,
        sizes: vec![9],
    }
}

fn sale(id: &str, product_id: &str, quantity: u32, total: f64, profit: f64) -> Sale {
    Sale {
        id: id.into(),
        customer_id: "c1".into(),
        product_id: product_id.into(),
        quantity,
        size: 9,
        total_amount: total,
        profit,
        date: "2024-12-01".into(),
        status: SaleStatus::Completed,
    }
}

fn stat(month: &str, revenue: f64) -> MonthlyStat {
    MonthlyStat { month: month.into(), revenue, profit: 0.0, sales: 0, customers: 0 }
}

#[test]
fn totals_average_and_margin() {
    let store = EntityStore {
        customers: vec![],
        products: vec![product("p1", "Air Runner")],
        sales: vec![
            sale("s1", "p1", 1, 100.0, 40.0),
            sale("s2", "p1", 1, 300.0, 120.0),
        ],
        monthly_stats: vec![],
    };
    let m = DashboardMetrics::compute(&store);
    assert_eq!(m.total_revenue, 400.0);
    assert_eq!(m.total_profit, 160.0);
    assert_eq!(m.total_sales, 2);
    assert_eq!(m.average_order_value, 200.0);
    assert_eq!(m.profit_margin, 40.0);
}

#[test]
fn empty_store_yields_zeroed_metrics() {
    let m = DashboardMetrics::compute(&EntityStore::default());
    assert_eq!(m.total_revenue, 0.0);
    assert_eq!(m.average_order_value, 0.0, "no division by a zero sale count");
    assert_eq!(m.profit_margin, 0.0);
    assert_eq!(m.top_selling_product, "");
    assert_eq!(m.monthly_growth, 0.0);
}

#[test]
fn top_seller_counts_units_and_skips_dangling_sales() {
    let store = EntityStore {
        customers: vec![],
        products: vec![product("p1", "Air Runner"), product("p2", "Classic Comfort")],
        sales: vec![
            sale("s1", "p1", 2, 200.0, 80.0),
            sale("s2", "p2", 3, 300.0, 120.0),
            sale("s3", "ghost", 100, 1.0, 0.0),
        ],
        monthly_stats: vec![],
    };
    let m = DashboardMetrics::compute(&store);
    assert_eq!(m.top_selling_product, "Classic Comfort");
}

#[test]
fn monthly_growth_uses_the_last_two_months() {
    let store = EntityStore {
        monthly_stats: vec![stat("Oct", 999.0), stat("Nov", 100.0), stat("Dec", 150.0)],
        ..EntityStore::default()
    };
    let m = DashboardMetrics::compute(&store);
    assert_eq!(m.monthly_growth, 50.0);

    let single = EntityStore {
        monthly_stats: vec![stat("Dec", 100.0)],
        ..EntityStore::default()
    };
    assert_eq!(
        DashboardMetrics::compute(&single).monthly_growth,
        0.0,
        "one month has no baseline"
    );
}
