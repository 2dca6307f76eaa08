// Unit tests for the cardseek search engine

use cardseek::core::{
    distance::distance_miles,
    filters::{is_eligible, matches_filters},
    SearchEngine,
};
use cardseek::models::{
    CardCondition, GeoPoint, ListingRow, SearchQuery, SellerType, SortKey, SortOrder,
};
use uuid::Uuid;

fn create_listing(
    card_name: &str,
    price: f64,
    condition: CardCondition,
    quantity: i32,
    lat: f64,
    lon: f64,
) -> ListingRow {
    ListingRow {
        id: Uuid::new_v4(),
        card_id: Uuid::new_v4(),
        seller_id: Uuid::new_v4(),
        card_name: card_name.to_string(),
        set_name: "Shadow Realm".to_string(),
        set_code: "SHR".to_string(),
        rarity: "rare".to_string(),
        condition,
        foil: false,
        price,
        quantity,
        seller_name: "Card Corner".to_string(),
        seller_type: SellerType::Store,
        location: GeoPoint::new(lat, lon),
        city: Some("New York".to_string()),
        state: Some("NY".to_string()),
        distance_miles: None,
    }
}

#[test]
fn test_distance_symmetry() {
    let a = GeoPoint::new(40.7128, -74.0060);
    let b = GeoPoint::new(34.0522, -118.2437);

    assert!((distance_miles(&a, &b) - distance_miles(&b, &a)).abs() < 1e-9);
}

#[test]
fn test_distance_zero_for_identical_points() {
    let p = GeoPoint::new(51.5074, -0.1278);
    assert!(distance_miles(&p, &p).abs() < 1e-9);
}

#[test]
fn test_distance_known_value_new_york_to_los_angeles() {
    // New York to Los Angeles is roughly 2450 miles great-circle
    let new_york = GeoPoint::new(40.7128, -74.0060);
    let los_angeles = GeoPoint::new(34.0522, -118.2437);

    let distance = distance_miles(&new_york, &los_angeles);
    assert!(
        distance > 2440.0 && distance < 2455.0,
        "Expected ~2450 miles, got {}",
        distance
    );
}

#[test]
fn test_distance_never_negative() {
    let points = [
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(90.0, 0.0),
        GeoPoint::new(-90.0, 0.0),
        GeoPoint::new(40.7128, -74.0060),
        GeoPoint::new(-33.8688, 151.2093),
    ];

    for a in &points {
        for b in &points {
            assert!(distance_miles(a, b) >= 0.0);
        }
    }
}

#[test]
fn test_out_of_stock_never_returned() {
    let engine = SearchEngine::with_defaults();
    let candidates = vec![
        create_listing("Bolt", 1.0, CardCondition::NearMint, 0, 40.71, -74.0),
        create_listing("Bolt", 2.0, CardCondition::NearMint, 3, 40.71, -74.0),
    ];

    let result = engine.search(candidates, &SearchQuery::default());

    assert_eq!(result.total, 1);
    assert!(result.items.iter().all(|row| row.quantity > 0));
}

#[test]
fn test_eligibility_predicate() {
    let mut row = create_listing("Bolt", 1.0, CardCondition::NearMint, 1, 40.71, -74.0);
    assert!(is_eligible(&row));
    row.quantity = 0;
    assert!(!is_eligible(&row));
}

#[test]
fn test_radius_boundary_is_inclusive() {
    let engine = SearchEngine::with_defaults();
    let origin = GeoPoint::new(40.7128, -74.0060);

    let row = create_listing("Bolt", 1.0, CardCondition::NearMint, 1, 40.9, -74.0060);
    let exact_distance = distance_miles(&origin, &row.location);

    // Radius exactly at the row's distance: included
    let query = SearchQuery {
        origin: Some(origin),
        radius_miles: Some(exact_distance),
        ..Default::default()
    };
    let result = engine.search(vec![row.clone()], &query);
    assert_eq!(result.total, 1);

    // Radius epsilon short of it: excluded
    let query = SearchQuery {
        origin: Some(origin),
        radius_miles: Some(exact_distance - 1e-9),
        ..Default::default()
    };
    let result = engine.search(vec![row], &query);
    assert_eq!(result.total, 0);
}

#[test]
fn test_pagination_is_deterministic() {
    let engine = SearchEngine::with_defaults();
    // Several rows share a price so ordering depends on sort stability
    let candidates: Vec<ListingRow> = (0..20)
        .map(|i| {
            create_listing(
                &format!("Card {}", i),
                f64::from(i % 4),
                CardCondition::NearMint,
                1,
                40.71,
                -74.0,
            )
        })
        .collect();

    let query = SearchQuery {
        limit: Some(7),
        offset: 3,
        ..Default::default()
    };

    let first = engine.search(candidates.clone(), &query);
    let second = engine.search(candidates, &query);

    let first_ids: Vec<Uuid> = first.items.iter().map(|r| r.id).collect();
    let second_ids: Vec<Uuid> = second.items.iter().map(|r| r.id).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn test_has_more_accounting() {
    let engine = SearchEngine::with_defaults();
    let candidates: Vec<ListingRow> = (0..10)
        .map(|i| create_listing("Bolt", f64::from(i), CardCondition::NearMint, 1, 40.71, -74.0))
        .collect();

    let result = engine.search(
        candidates.clone(),
        &SearchQuery {
            limit: Some(4),
            offset: 8,
            ..Default::default()
        },
    );
    assert_eq!(result.items.len(), 2);
    assert!(!result.has_more);

    let result = engine.search(
        candidates,
        &SearchQuery {
            limit: Some(4),
            offset: 4,
            ..Default::default()
        },
    );
    assert_eq!(result.items.len(), 4);
    assert!(result.has_more);
}

#[test]
fn test_price_bounds_inclusive_through_engine() {
    let engine = SearchEngine::with_defaults();
    let candidates = vec![
        create_listing("Bolt", 5.0, CardCondition::NearMint, 1, 40.71, -74.0),
        create_listing("Bolt", 10.0, CardCondition::NearMint, 1, 40.71, -74.0),
        create_listing("Bolt", 15.0, CardCondition::NearMint, 1, 40.71, -74.0),
    ];

    let query = SearchQuery {
        min_price: Some(5.0),
        max_price: Some(10.0),
        ..Default::default()
    };
    let result = engine.search(candidates, &query);

    let prices: Vec<f64> = result.items.iter().map(|r| r.price).collect();
    assert_eq!(prices, vec![5.0, 10.0]);
}

#[test]
fn test_filters_compose_with_and() {
    let row = create_listing("Lightning Bolt", 8.0, CardCondition::NearMint, 1, 40.71, -74.0);

    // Each filter matches individually
    let name_only = SearchQuery {
        card_name: Some("bolt".to_string()),
        ..Default::default()
    };
    assert!(matches_filters(&row, &name_only));

    let price_only = SearchQuery {
        max_price: Some(10.0),
        ..Default::default()
    };
    assert!(matches_filters(&row, &price_only));

    // Together, one failing filter fails the row
    let combined = SearchQuery {
        card_name: Some("bolt".to_string()),
        max_price: Some(5.0),
        ..Default::default()
    };
    assert!(!matches_filters(&row, &combined));
}

#[test]
fn test_condition_sort_ascending_is_best_first() {
    let engine = SearchEngine::with_defaults();
    let candidates = vec![
        create_listing("Bolt", 1.0, CardCondition::Poor, 1, 40.71, -74.0),
        create_listing("Bolt", 2.0, CardCondition::Mint, 1, 40.71, -74.0),
        create_listing("Bolt", 3.0, CardCondition::LightPlayed, 1, 40.71, -74.0),
    ];

    let asc = engine.search(
        candidates.clone(),
        &SearchQuery {
            sort_by: SortKey::Condition,
            ..Default::default()
        },
    );
    let asc_conditions: Vec<CardCondition> = asc.items.iter().map(|r| r.condition).collect();
    assert_eq!(
        asc_conditions,
        vec![CardCondition::Mint, CardCondition::LightPlayed, CardCondition::Poor]
    );

    let desc = engine.search(
        candidates,
        &SearchQuery {
            sort_by: SortKey::Condition,
            sort_order: SortOrder::Desc,
            ..Default::default()
        },
    );
    let desc_conditions: Vec<CardCondition> = desc.items.iter().map(|r| r.condition).collect();
    assert_eq!(
        desc_conditions,
        vec![CardCondition::Poor, CardCondition::LightPlayed, CardCondition::Mint]
    );
}
