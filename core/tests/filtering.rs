//! Predicate engine tests: field predicates, quick filters, date
//! bounds, and the referential cascade.

use chrono::NaiveDate;
use shopdash_core::{
    filter::{filter, FilterAction, FilterSpec, QuickFilterKey},
    model::{Category, Customer, CustomerStatus, Product, Sale, SaleStatus},
    store::EntityStore,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

fn customer(id: &str, name: &str, total_spent: f64, status: CustomerStatus) -> Customer {
    Customer {
        id: id.into(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "+1 (555) 123-4567".into(),
        total_spent,
        last_purchase: "2024-12-15".into(),
        status,
        location: "New York, NY".into(),
    }
}

fn product(id: &str, name: &str, brand: &str, category: Category, stock: u32) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        brand: brand.into(),
        category,
        price: 100.0,
        cost: 50.0,
        stock,
        sizes: vec![8, 9, 10],
    }
}

fn sale(id: &str, customer_id: &str, product_id: &str, date: &str) -> Sale {
    Sale {
        id: id.into(),
        customer_id: customer_id.into(),
        product_id: product_id.into(),
        quantity: 1,
        size: 9,
        total_amount: 100.0,
        profit: 50.0,
        date: date.into(),
        status: SaleStatus::Completed,
    }
}

fn store() -> EntityStore {
    EntityStore {
        customers: vec![
            customer("c1", "John Smith", 600.0, CustomerStatus::Active),
            customer("c2", "Sarah Johnson", 400.0, CustomerStatus::Inactive),
        ],
        products: vec![
            product("p1", "Air Runner", "SoleMax", Category::Running, 45),
            product("p2", "Classic Comfort", "WalkEasy", Category::Casual, 12),
        ],
        sales: vec![
            sale("s1", "c1", "p1", "2024-12-15"),
            sale("s2", "c2", "p2", "2024-06-01"),
        ],
        monthly_stats: vec![],
    }
}

#[test]
fn empty_spec_passes_everything_in_original_order() {
    let view = filter(&store(), &FilterSpec::default(), today());
    assert_eq!(view.customers.len(), 2);
    assert_eq!(view.products.len(), 2);
    assert_eq!(view.sales.len(), 2);
    assert_eq!(view.customers[0].id, "c1", "original order must be preserved");
}

#[test]
fn high_value_quick_filter_uses_500_threshold() {
    let spec = FilterSpec::default().apply(FilterAction::SetQuickFilter {
        key: QuickFilterKey::HighValueCustomers,
        value: true,
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.customers.len(), 1);
    assert_eq!(view.customers[0].id, "c1", "600 > 500 passes, 400 does not");

    let mut low = store();
    low.customers[0].total_spent = 400.0;
    let view = filter(&low, &spec, today());
    assert!(
        !view.customers.iter().any(|c| c.id == "c1"),
        "exactly 500 or below must be excluded"
    );
}

#[test]
fn search_term_matches_name_email_or_phone_case_insensitively() {
    let spec = FilterSpec::default().apply(FilterAction::SetSearchTerm {
        term: "SARAH".into(),
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.customers.len(), 1);
    assert_eq!(view.customers[0].id, "c2");

    let spec = FilterSpec::default().apply(FilterAction::SetSearchTerm {
        term: "555) 123".into(),
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.customers.len(), 2, "phone digits match all seeded customers");
}

#[test]
fn search_term_matches_product_name_or_brand() {
    let spec = FilterSpec::default().apply(FilterAction::SetSearchTerm {
        term: "walkeasy".into(),
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.products.len(), 1);
    assert_eq!(view.products[0].id, "p2");
}

#[test]
fn category_brand_and_low_stock_narrow_products() {
    let spec = FilterSpec::default().apply(FilterAction::SetCategories {
        categories: vec![Category::Casual],
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.products.len(), 1);

    let spec = FilterSpec::default().apply(FilterAction::SetQuickFilter {
        key: QuickFilterKey::LowStock,
        value: true,
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.products.len(), 1, "only stock < 20 passes");
    assert_eq!(view.products[0].id, "p2");
}

#[test]
fn status_and_location_narrow_customers() {
    let spec = FilterSpec::default().apply(FilterAction::SetCustomerStatus {
        status: vec![CustomerStatus::Inactive],
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.customers.len(), 1);
    assert_eq!(view.customers[0].id, "c2");

    let spec = FilterSpec::default().apply(FilterAction::SetLocations {
        locations: vec!["Chicago, IL".into()],
    });
    let view = filter(&store(), &spec, today());
    assert!(view.customers.is_empty());
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let spec = FilterSpec::default().apply(FilterAction::SetDateRange {
        start: "2024-12-15".into(),
        end: "2024-12-15".into(),
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.sales.len(), 1);
    assert_eq!(view.sales[0].id, "s1");
}

#[test]
fn malformed_date_bound_is_treated_as_open() {
    let spec = FilterSpec::default().apply(FilterAction::SetDateRange {
        start: "not-a-date".into(),
        end: "2024-07-01".into(),
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.sales.len(), 1, "start bound opens, end bound still applies");
    assert_eq!(view.sales[0].id, "s2");
}

#[test]
fn recent_sales_quick_filter_uses_30_day_window() {
    let spec = FilterSpec::default().apply(FilterAction::SetQuickFilter {
        key: QuickFilterKey::RecentSales,
        value: true,
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.sales.len(), 1);
    assert_eq!(view.sales[0].id, "s1", "June sale falls outside the window");
}

#[test]
fn sale_with_missing_product_is_excluded() {
    let mut s = store();
    s.products.clear();
    let view = filter(&s, &FilterSpec::default(), today());
    assert!(view.sales.is_empty(), "no product can resolve, so no sale survives");
    assert_eq!(view.customers.len(), 2, "customers are unaffected");
}

#[test]
fn referential_cascade_follows_customer_filters() {
    // Narrowing customers to c1 must drop c2's sale even though the
    // sale itself matches no sales-specific criterion.
    let spec = FilterSpec::default().apply(FilterAction::SetCustomerStatus {
        status: vec![CustomerStatus::Active],
    });
    let view = filter(&store(), &spec, today());
    assert_eq!(view.sales.len(), 1);
    assert_eq!(view.sales[0].id, "s1");
}

#[test]
fn filtered_sales_are_always_a_subset_of_filtered_references() {
    // Property from the contract: for any spec, every surviving sale
    // resolves inside the surviving customers and products.
    let specs = vec![
        FilterSpec::default(),
        FilterSpec::default().apply(FilterAction::SetSearchTerm { term: "o".into() }),
        FilterSpec::default().apply(FilterAction::SetCategories {
            categories: vec![Category::Running],
        }),
        FilterSpec::default().apply(FilterAction::SetQuickFilter {
            key: QuickFilterKey::HighValueCustomers,
            value: true,
        }),
    ];
    for spec in specs {
        let view = filter(&store(), &spec, today());
        let customers: Vec<&str> = view.customers.iter().map(|c| c.id.as_str()).collect();
        let products: Vec<&str> = view.products.iter().map(|p| p.id.as_str()).collect();
        for sale in &view.sales {
            assert!(
                customers.contains(&sale.customer_id.as_str()),
                "sale {} references a filtered-out customer",
                sale.id
            );
            assert!(
                products.contains(&sale.product_id.as_str()),
                "sale {} references a filtered-out product",
                sale.id
            );
        }
    }
}

#[test]
fn reset_filters_restores_the_default_spec() {
    let spec = FilterSpec::default()
        .apply(FilterAction::SetSearchTerm { term: "air".into() })
        .apply(FilterAction::SetBrands { brands: vec!["SoleMax".into()] })
        .apply(FilterAction::SetQuickFilter {
            key: QuickFilterKey::LowStock,
            value: true,
        })
        .apply(FilterAction::ResetFilters);
    assert_eq!(spec, FilterSpec::default());
}
