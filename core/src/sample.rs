//! Deterministic sample dataset generation using curated lists.
//!
//! Stands in for the real feed during development and tests. All
//! generation flows through one [`DashRng`] stream, so the same seed
//! always produces byte-identical collections, referentially
//! consistent by construction: every sale points at a generated
//! customer and product.

use crate::{
    model::{Category, Customer, CustomerStatus, MonthlyStat, Product, Sale, SaleStatus},
    rng::DashRng,
    store::EntityStore,
};
use chrono::{Duration, NaiveDate};

/// Fixed reference date so generated histories never drift with the
/// wall clock. Callers that filter by recency inject the same date.
pub const REFERENCE_DATE: &str = "2024-12-31";

#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    pub customers: usize,
    pub products: usize,
    pub sales: usize,
    pub months: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self { customers: 40, products: 12, sales: 200, months: 12 }
    }
}

const FIRST_NAMES: &[&str] = &[
    "John", "Sarah", "Mike", "Emily", "Robert", "Lisa", "David", "Anna", "James", "Maria",
    "Kevin", "Laura", "Brian", "Nicole", "Jason", "Amanda", "Carlos", "Priya", "Tom", "Grace",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Wilson", "Davis", "Brown", "Anderson", "Taylor", "Thomas", "Moore",
    "Martin", "Lee", "Walker", "Hall", "Young", "King", "Wright", "Lopez", "Hill", "Scott",
    "Green",
];

const LOCATIONS: &[&str] = &[
    "New York, NY", "Los Angeles, CA", "Chicago, IL", "Houston, TX", "Phoenix, AZ",
    "Philadelphia, PA", "San Antonio, TX", "San Diego, CA", "Dallas, TX", "Portland, OR",
];

const BRANDS: &[&str] = &[
    "SoleMax", "WalkEasy", "BusinessStep", "AthleteGear", "CityStep", "TrailBound",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Air", "Classic", "Executive", "Sport", "Urban", "Swift", "Prime", "Metro",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Runner", "Comfort", "Elite", "Master", "Walker", "Stride", "Flex", "Edge",
];

const CATEGORIES: &[Category] = &[
    Category::Running,
    Category::Casual,
    Category::Formal,
    Category::Sports,
];

fn reference_date() -> NaiveDate {
    NaiveDate::parse_from_str(REFERENCE_DATE, "%Y-%m-%d")
        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
}

fn iso_days_before(base: NaiveDate, days: u64) -> String {
    (base - Duration::days(days as i64)).format("%Y-%m-%d").to_string()
}

/// Round to cents so snapshots serialize cleanly.
fn cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn generate(config: &SampleConfig, rng: &mut DashRng) -> EntityStore {
    let base = reference_date();
    let customers = gen_customers(config.customers, base, rng);
    let products = gen_products(config.products, rng);
    let sales = gen_sales(config.sales, &customers, &products, base, rng);
    let monthly_stats = gen_monthly(config.months, rng);
    EntityStore { customers, products, sales, monthly_stats }
}

fn gen_customers(n: usize, base: NaiveDate, rng: &mut DashRng) -> Vec<Customer> {
    (0..n)
        .map(|i| {
            let first = *rng.pick(FIRST_NAMES);
            let last = *rng.pick(LAST_NAMES);
            Customer {
                id: format!("c-{i:04}"),
                name: format!("{first} {last}"),
                email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                phone: format!(
                    "+1 (555) {:03}-{:04}",
                    rng.next_u64_below(900) + 100,
                    rng.next_u64_below(10_000)
                ),
                total_spent: cents(50.0 + rng.next_f64() * 1_450.0),
                last_purchase: iso_days_before(base, rng.next_u64_below(90)),
                status: if rng.chance(0.8) {
                    CustomerStatus::Active
                } else {
                    CustomerStatus::Inactive
                },
                location: rng.pick(LOCATIONS).to_string(),
            }
        })
        .collect()
}

fn gen_products(n: usize, rng: &mut DashRng) -> Vec<Product> {
    (0..n)
        .map(|i| {
            let category = *rng.pick(CATEGORIES);
            let price = cents(match category {
                Category::Running => 100.0 + rng.next_f64() * 80.0,
                Category::Casual => 60.0 + rng.next_f64() * 60.0,
                Category::Formal => 140.0 + rng.next_f64() * 100.0,
                Category::Sports => 90.0 + rng.next_f64() * 90.0,
            });
            let low = 6 + rng.next_u64_below(2) as u32;
            let high = 11 + rng.next_u64_below(3) as u32;
            Product {
                id: format!("p-{i:04}"),
                name: format!("{} {}", rng.pick(PRODUCT_ADJECTIVES), rng.pick(PRODUCT_NOUNS)),
                brand: rng.pick(BRANDS).to_string(),
                category,
                price,
                cost: cents(price * (0.45 + rng.next_f64() * 0.15)),
                stock: rng.next_u64_below(60) as u32,
                sizes: (low..=high).collect(),
            }
        })
        .collect()
}

fn gen_sales(
    n: usize,
    customers: &[Customer],
    products: &[Product],
    base: NaiveDate,
    rng: &mut DashRng,
) -> Vec<Sale> {
    if customers.is_empty() || products.is_empty() {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let customer = rng.pick(customers);
            let product = rng.pick(products);
            let quantity = 1 + rng.next_u64_below(3) as u32;
            let status = match rng.next_f64() {
                r if r < 0.80 => SaleStatus::Completed,
                r if r < 0.92 => SaleStatus::Pending,
                _ => SaleStatus::Cancelled,
            };
            Sale {
                id: format!("s-{i:06}"),
                customer_id: customer.id.clone(),
                product_id: product.id.clone(),
                quantity,
                size: *rng.pick(&product.sizes),
                total_amount: cents(product.price * quantity as f64),
                profit: cents((product.price - product.cost) * quantity as f64),
                date: iso_days_before(base, rng.next_u64_below(180)),
                status,
            }
        })
        .collect()
}

fn gen_monthly(n: usize, rng: &mut DashRng) -> Vec<MonthlyStat> {
    const MONTHS: &[&str] = &[
        "Jan", "Feb", "Mar", "Apr", "May", "Jun",
        "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    (0..n)
        .map(|i| {
            let revenue = cents(8_000.0 + rng.next_f64() * 8_000.0);
            MonthlyStat {
                month: format!("{} 2024", MONTHS[i % MONTHS.len()]),
                revenue,
                profit: cents(revenue * (0.30 + rng.next_f64() * 0.20)),
                sales: 60 + rng.next_u64_below(80) as u32,
                customers: 20 + rng.next_u64_below(30) as u32,
            }
        })
        .collect()
}
