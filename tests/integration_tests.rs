// Integration tests for the cardseek search pipeline

use cardseek::core::SearchEngine;
use cardseek::models::{
    CardCondition, GeoPoint, ListingRow, SearchParams, SearchQuery, SellerType, SortKey,
};
use uuid::Uuid;

const NEW_YORK: (f64, f64) = (40.7128, -74.0060);

fn create_listing(
    card_name: &str,
    price: f64,
    condition: CardCondition,
    quantity: i32,
    lat: f64,
    lon: f64,
    seller_type: SellerType,
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
        seller_name: format!("{} seller", card_name),
        seller_type,
        location: GeoPoint::new(lat, lon),
        city: None,
        state: None,
        distance_miles: None,
    }
}

#[test]
fn test_end_to_end_geo_search() {
    let engine = SearchEngine::with_defaults();
    let (lat, lon) = NEW_YORK;

    // ~3 miles out, ~10 miles out, and an out-of-stock row
    let candidates = vec![
        create_listing("Bolt", 5.0, CardCondition::Mint, 2, lat + 0.045, lon, SellerType::Store),
        create_listing("Bolt", 20.0, CardCondition::Played, 1, lat + 0.145, lon, SellerType::Individual),
        create_listing("Bolt", 1.0, CardCondition::NearMint, 0, lat, lon, SellerType::Store),
    ];

    let query = SearchQuery {
        max_price: Some(25.0),
        origin: Some(GeoPoint::new(lat, lon)),
        radius_miles: Some(15.0),
        sort_by: SortKey::Price,
        limit: Some(10),
        ..Default::default()
    };

    let result = engine.search(candidates, &query);

    assert_eq!(result.total, 2);
    assert!(!result.has_more);
    let prices: Vec<f64> = result.items.iter().map(|r| r.price).collect();
    assert_eq!(prices, vec![5.0, 20.0]);
    for item in &result.items {
        let distance = item.distance_miles.expect("distance must be attached");
        assert!(distance <= 15.0);
    }
}

#[test]
fn test_distance_sort_ranks_nearest_first() {
    let engine = SearchEngine::with_defaults();
    let (lat, lon) = NEW_YORK;

    let candidates = vec![
        create_listing("Far", 1.0, CardCondition::Mint, 1, lat + 0.20, lon, SellerType::Store),
        create_listing("Near", 9.0, CardCondition::Mint, 1, lat + 0.02, lon, SellerType::Store),
        create_listing("Mid", 5.0, CardCondition::Mint, 1, lat + 0.10, lon, SellerType::Store),
    ];

    let query = SearchQuery {
        origin: Some(GeoPoint::new(lat, lon)),
        sort_by: SortKey::Distance,
        ..Default::default()
    };

    let result = engine.search(candidates, &query);

    let names: Vec<&str> = result.items.iter().map(|r| r.card_name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Mid", "Far"]);
}

#[test]
fn test_non_geo_search_carries_no_distances() {
    let engine = SearchEngine::with_defaults();
    let (lat, lon) = NEW_YORK;

    let candidates = vec![
        create_listing("Bolt", 5.0, CardCondition::Mint, 1, lat, lon, SellerType::Store),
        // Los Angeles stays in the result set: no origin means no radius filter
        create_listing("Bolt", 6.0, CardCondition::Mint, 1, 34.0522, -118.2437, SellerType::Store),
    ];

    let result = engine.search(candidates, &SearchQuery::default());

    assert_eq!(result.total, 2);
    assert!(result.items.iter().all(|r| r.distance_miles.is_none()));
}

#[test]
fn test_combined_filters_narrow_the_set() {
    let engine = SearchEngine::with_defaults();
    let (lat, lon) = NEW_YORK;

    let candidates = vec![
        create_listing("Lightning Bolt", 4.0, CardCondition::NearMint, 1, lat, lon, SellerType::Store),
        create_listing("Lightning Bolt", 4.5, CardCondition::Played, 1, lat, lon, SellerType::Store),
        create_listing("Lightning Bolt", 4.2, CardCondition::NearMint, 1, lat, lon, SellerType::Individual),
        create_listing("Counterspell", 4.1, CardCondition::NearMint, 1, lat, lon, SellerType::Store),
    ];

    let query = SearchQuery {
        card_name: Some("lightning".to_string()),
        conditions: Some(vec![CardCondition::Mint, CardCondition::NearMint]),
        seller_types: Some(vec![SellerType::Store]),
        ..Default::default()
    };

    let result = engine.search(candidates, &query);

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].price, 4.0);
}

#[test]
fn test_wire_params_flow_through_engine() {
    // Exercise the request-layer conversion feeding the engine, the same
    // path the HTTP handler takes
    let raw = serde_json::json!({
        "cardName": "bolt",
        "condition": "MINT,NEAR_MINT",
        "maxPrice": 10.0,
        "latitude": NEW_YORK.0,
        "longitude": NEW_YORK.1,
        "radiusMiles": 50.0,
        "sortBy": "price",
        "sortOrder": "desc",
        "limit": 2
    });
    let params: SearchParams = serde_json::from_value(raw).unwrap();
    let query = params.to_search_query(200).unwrap();

    let (lat, lon) = NEW_YORK;
    let candidates = vec![
        create_listing("Bolt", 3.0, CardCondition::Mint, 1, lat, lon, SellerType::Store),
        create_listing("Bolt", 9.0, CardCondition::NearMint, 1, lat, lon, SellerType::Store),
        create_listing("Bolt", 6.0, CardCondition::Mint, 1, lat, lon, SellerType::Store),
        create_listing("Bolt", 6.0, CardCondition::Played, 1, lat, lon, SellerType::Store),
    ];

    let engine = SearchEngine::with_defaults();
    let result = engine.search(candidates, &query);

    assert_eq!(result.total, 3);
    assert!(result.has_more);
    let prices: Vec<f64> = result.items.iter().map(|r| r.price).collect();
    assert_eq!(prices, vec![9.0, 6.0]);
}

#[test]
fn test_contradictory_query_yields_empty_result() {
    let engine = SearchEngine::with_defaults();
    let (lat, lon) = NEW_YORK;

    let candidates = vec![create_listing(
        "Bolt",
        5.0,
        CardCondition::Mint,
        1,
        lat,
        lon,
        SellerType::Store,
    )];

    let query = SearchQuery {
        min_price: Some(100.0),
        max_price: Some(1.0),
        ..Default::default()
    };

    let result = engine.search(candidates, &query);

    assert!(result.items.is_empty());
    assert_eq!(result.total, 0);
    assert!(!result.has_more);
}
