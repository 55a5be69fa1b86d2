//! Proximity query behaviour against a real PostGIS store

mod common;

use common::{SpatialTable, LA_LAT, LA_LNG};
use dropoffs_server::{Coordinate, DropoffRepo, PoolConfig, QuerySettings};
use serde_json::Value;

fn features(doc: &str) -> Vec<Value> {
    let value: Value = serde_json::from_str(doc).expect("valid GeoJSON");
    assert_eq!(value["type"], "FeatureCollection");
    value["features"].as_array().cloned().expect("features array")
}

fn los_angeles() -> Coordinate {
    Coordinate::new(LA_LAT, LA_LNG).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn near_row_kept_far_row_excluded() {
    let pool = common::test_pool(PoolConfig::default()).await;
    let table = SpatialTable::create(&pool).await;
    table.insert_at_distance(&pool, LA_LAT, LA_LNG, 500.0, "near").await;
    table.insert_at_distance(&pool, LA_LAT, LA_LNG, 20_000.0, "far").await;

    let settings = QuerySettings::default().with_table(table.name.clone());
    let fc = DropoffRepo::new(&pool, &settings)
        .nearby(los_angeles())
        .await
        .unwrap();

    let found = features(fc.as_str());
    assert_eq!(found.len(), 1);
    let feature = &found[0];
    assert_eq!(feature["type"], "Feature");
    assert!(feature["id"].is_number());
    assert_eq!(feature["geometry"]["type"], "Point");
    assert_eq!(feature["properties"]["business_name"], "near");
    assert!(feature["properties"].get("ogc_fid").is_none());
    assert!(feature["properties"].get("wkb_geometry").is_none());

    let distance = feature["properties"]["distance"].as_f64().unwrap();
    assert!((distance - 500.0).abs() < 1.0, "distance was {}", distance);

    table.drop(&pool).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn ranked_set_is_capped_at_limit() {
    let pool = common::test_pool(PoolConfig::default()).await;
    let table = SpatialTable::create(&pool).await;
    for i in 0..30 {
        let meters = 100.0 + i as f64 * 10.0;
        table
            .insert_at_distance(&pool, LA_LAT, LA_LNG, meters, &format!("site-{}", i))
            .await;
    }

    let settings = QuerySettings::default().with_table(table.name.clone());
    let fc = DropoffRepo::new(&pool, &settings)
        .nearby(los_angeles())
        .await
        .unwrap();

    let found = features(fc.as_str());
    assert_eq!(found.len(), 25);

    // Nearest first, and the 5 farthest were cut by rank.
    let distances: Vec<f64> = found
        .iter()
        .map(|f| f["properties"]["distance"].as_f64().unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(distances.iter().all(|d| *d < settings.radius_meters));
    assert!(found
        .iter()
        .all(|f| f["properties"]["business_name"] != "site-29"));

    table.drop(&pool).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn all_rows_within_radius_returned_when_under_limit() {
    let pool = common::test_pool(PoolConfig::default()).await;
    let table = SpatialTable::create(&pool).await;
    for i in 0..10 {
        table
            .insert_at_distance(&pool, LA_LAT, LA_LNG, 1_000.0 * (i + 1) as f64, "inside")
            .await;
    }
    for i in 0..20 {
        table
            .insert_at_distance(&pool, LA_LAT, LA_LNG, 17_000.0 + 100.0 * i as f64, "outside")
            .await;
    }

    let settings = QuerySettings::default().with_table(table.name.clone());
    let fc = DropoffRepo::new(&pool, &settings)
        .nearby(los_angeles())
        .await
        .unwrap();

    let found = features(fc.as_str());
    assert_eq!(found.len(), 10);
    assert!(found
        .iter()
        .all(|f| f["properties"]["business_name"] == "inside"));

    table.drop(&pool).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn nothing_within_radius_is_empty_collection() {
    let pool = common::test_pool(PoolConfig::default()).await;
    let table = SpatialTable::create(&pool).await;
    let settings = QuerySettings::default().with_table(table.name.clone());
    let repo = DropoffRepo::new(&pool, &settings);

    // Empty table
    let fc = repo.nearby(los_angeles()).await.unwrap();
    assert!(features(fc.as_str()).is_empty());

    // Rows exist, none close enough
    table.insert_at_distance(&pool, LA_LAT, LA_LNG, 50_000.0, "far").await;
    let fc = repo.nearby(los_angeles()).await.unwrap();
    assert!(features(fc.as_str()).is_empty());

    table.drop(&pool).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn query_point_is_longitude_first() {
    let pool = common::test_pool(PoolConfig::default()).await;
    let table = SpatialTable::create(&pool).await;
    // x = 20 (longitude), y = 10 (latitude)
    table.insert_point(&pool, 20.0, 10.0, "here").await;

    let settings = QuerySettings::default().with_table(table.name.clone());
    let repo = DropoffRepo::new(&pool, &settings);

    let fc = repo.nearby_raw("10", "20").await.unwrap();
    let found = features(fc.as_str());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["geometry"]["coordinates"][0], 20.0);
    assert_eq!(found[0]["geometry"]["coordinates"][1], 10.0);
    assert!(found[0]["properties"]["distance"].as_f64().unwrap() < 1.0);

    // Latitude and longitude swapped lands ~1500 km away
    let swapped = Coordinate::new(20.0, 10.0).unwrap();
    let fc = repo.nearby(swapped).await.unwrap();
    assert!(features(fc.as_str()).is_empty());

    table.drop(&pool).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_table_is_query_error() {
    let pool = common::test_pool(PoolConfig::default()).await;
    let settings = QuerySettings::default()
        .with_table(dropoffs_server::TableName::new("no_such_table_here").unwrap());

    let err = DropoffRepo::new(&pool, &settings)
        .nearby(los_angeles())
        .await
        .unwrap_err();
    assert!(matches!(err, dropoffs_server::QueryError::Execution(_)));
}
