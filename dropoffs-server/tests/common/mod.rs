//! Shared fixtures for database-backed tests
//!
//! Connection values come from the same variables the service reads:
//! DB_TCP_HOST=127.0.0.1 DB_USER=postgres DB_PASS=... DB_PORT=5432 DB_NAME=... \
//!     cargo test -p dropoffs-server -- --ignored
//! The database needs the PostGIS extension available.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use dropoffs_server::{create_pool, ConnectMode, ConnectSettings, PoolConfig, TableName};
use sqlx::PgPool;

pub const LA_LAT: f64 = 34.0522;
pub const LA_LNG: f64 = -118.2437;

static TABLE_SEQ: AtomicUsize = AtomicUsize::new(0);

pub fn test_mode() -> ConnectMode {
    let var = |key: &str| std::env::var(key).ok();
    ConnectSettings {
        tcp_host: var("DB_TCP_HOST"),
        user: var("DB_USER"),
        password: var("DB_PASS"),
        port: var("DB_PORT"),
        database: var("DB_NAME"),
        socket_dir: var("DB_SOCKET_DIR").map(Into::into),
    }
    .resolve()
    .expect("database settings")
}

pub async fn test_pool(config: PoolConfig) -> PgPool {
    create_pool(&config, &test_mode())
        .await
        .expect("pool creation failed")
}

/// A throwaway spatial table shaped like an ogr2ogr import.
pub struct SpatialTable {
    pub name: TableName,
}

impl SpatialTable {
    pub async fn create(pool: &PgPool) -> Self {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis")
            .execute(pool)
            .await
            .expect("postgis extension");

        let name = TableName::new(&format!(
            "dropoffs_test_{}_{}",
            std::process::id(),
            TABLE_SEQ.fetch_add(1, Ordering::SeqCst)
        ))
        .unwrap();

        sqlx::query(&format!(
            r#"
            CREATE TABLE {} (
                ogc_fid SERIAL PRIMARY KEY,
                wkb_geometry geometry(Point, 4326),
                business_name TEXT,
                zip_code TEXT
            )
            "#,
            name.quoted()
        ))
        .execute(pool)
        .await
        .expect("create table");

        Self { name }
    }

    /// Insert a point `meters` away from (lat, lng), heading north-east.
    pub async fn insert_at_distance(
        &self,
        pool: &PgPool,
        lat: f64,
        lng: f64,
        meters: f64,
        business_name: &str,
    ) {
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (wkb_geometry, business_name, zip_code)
            SELECT ST_Project(ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3, radians(45))::geometry,
                   $4, '78701'
            "#,
            self.name.quoted()
        ))
        .bind(lng)
        .bind(lat)
        .bind(meters)
        .bind(business_name)
        .execute(pool)
        .await
        .expect("insert row");
    }

    /// Insert a point at exactly (x, y).
    pub async fn insert_point(&self, pool: &PgPool, x: f64, y: f64, business_name: &str) {
        sqlx::query(&format!(
            "INSERT INTO {} (wkb_geometry, business_name) VALUES (ST_SetSRID(ST_MakePoint($1, $2), 4326), $3)",
            self.name.quoted()
        ))
        .bind(x)
        .bind(y)
        .bind(business_name)
        .execute(pool)
        .await
        .expect("insert point");
    }

    pub async fn drop(self, pool: &PgPool) {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", self.name.quoted()))
            .execute(pool)
            .await
            .expect("drop table");
    }
}
