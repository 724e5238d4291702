//! Sample dataset generator tests: determinism, referential
//! consistency, and the store's JSON seam.

use shopdash_core::{
    rng::{DashRng, StreamSlot},
    sample::{self, SampleConfig},
    store::EntityStore,
};

fn generate(seed: u64, config: &SampleConfig) -> EntityStore {
    let mut rng = DashRng::new(seed, StreamSlot::Sample);
    sample::generate(config, &mut rng)
}

#[test]
fn same_seed_generates_identical_stores() {
    let config = SampleConfig::default();
    assert_eq!(generate(42, &config), generate(42, &config));
    assert_ne!(generate(42, &config), generate(43, &config));
}

#[test]
fn generated_collections_match_the_config() {
    let config = SampleConfig { customers: 7, products: 3, sales: 25, months: 6 };
    let store = generate(1, &config);
    assert_eq!(store.customers.len(), 7);
    assert_eq!(store.products.len(), 3);
    assert_eq!(store.sales.len(), 25);
    assert_eq!(store.monthly_stats.len(), 6);
}

#[test]
fn every_generated_sale_resolves() {
    let store = generate(9, &SampleConfig::default());
    assert_eq!(
        store.resolvable_sales().len(),
        store.sales.len(),
        "the generator must be referentially consistent by construction"
    );
}

#[test]
fn generated_products_are_coherent() {
    let store = generate(5, &SampleConfig::default());
    for p in &store.products {
        assert!(!p.sizes.is_empty(), "size set must be non-empty");
        assert!(p.cost < p.price, "{}: cost {} >= price {}", p.id, p.cost, p.price);
    }
    for s in &store.sales {
        assert!(s.quantity >= 1);
        assert!(s.total_amount >= 0.0);
    }
}

#[test]
fn store_round_trips_through_the_json_seam() {
    let store = generate(3, &SampleConfig { customers: 3, products: 2, sales: 5, months: 2 });
    let json = store.to_json().unwrap();
    assert!(json.contains("totalSpent"), "wire form uses the feed's camelCase names");
    assert!(json.contains("customerId"));
    let decoded = EntityStore::from_json(&json).unwrap();
    assert_eq!(decoded, store);
}

#[test]
fn malformed_feed_json_is_an_error_not_a_panic() {
    assert!(EntityStore::from_json("{\"customers\": 12}").is_err());
}
