//! Drop-off repository - bounded nearest-neighbour lookup
//!
//! The result set is defined by two stages, in this order:
//! 1. rank every row by geography distance to the center and keep the
//!    nearest `row_limit`
//! 2. drop any of those whose distance is not below `radius_meters`
//!
//! So a dense area can yield fewer than `row_limit` features even when
//! more qualifying rows exist further down the ranking.

use sqlx::PgPool;

use crate::config::QuerySettings;
use crate::db::adapter::adapt;
use crate::error::QueryError;
use crate::models::{Coordinate, FeatureCollection};

/// A single proximity lookup, ready to bind
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityQuery {
    pub center: Coordinate,
    pub radius_meters: f64,
    pub row_limit: i64,
    sql: String,
}

impl ProximityQuery {
    pub fn new(center: Coordinate, settings: &QuerySettings) -> Self {
        Self {
            center,
            radius_meters: settings.radius_meters,
            row_limit: settings.row_limit,
            sql: proximity_sql(&settings.table.quoted()),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Values for `$1..$4`: longitude, latitude, radius, limit.
    pub fn bindings(&self) -> (f64, f64, f64, i64) {
        let (x, y) = self.center.point();
        (x, y, self.radius_meters, self.row_limit)
    }

    /// Run against the pool and adapt the aggregate.
    pub async fn execute(&self, pool: &PgPool) -> Result<FeatureCollection, QueryError> {
        let (lng, lat, radius, limit) = self.bindings();

        let row = sqlx::query_scalar::<_, Option<String>>(&self.sql)
            .bind(lng)
            .bind(lat)
            .bind(radius)
            .bind(limit)
            .fetch_optional(pool)
            .await?;

        adapt(row)
    }
}

/// Build the aggregate query for a quoted table identifier.
///
/// Only the identifier is spliced in; every value is a bound parameter.
fn proximity_sql(table: &str) -> String {
    format!(
        r#"
        SELECT jsonb_build_object(
            'type', 'FeatureCollection',
            'features', COALESCE(jsonb_agg(feature), '[]'::jsonb)
        )::text
        FROM (
            SELECT jsonb_build_object(
                'type', 'Feature',
                'id', ogc_fid,
                'geometry', ST_AsGeoJSON(wkb_geometry)::jsonb,
                'properties', to_jsonb(candidate) - 'ogc_fid' - 'wkb_geometry'
            ) AS feature
            FROM (
                SELECT *,
                    ST_Distance(
                        ST_GeogFromWKB(wkb_geometry),
                        ST_GeogFromWKB(ST_MakePoint($1::float8, $2::float8))
                    ) AS distance
                FROM {table}
                ORDER BY distance
                LIMIT $4
            ) candidate
            WHERE distance < $3
        ) features
        "#
    )
}

/// Drop-off repository
pub struct DropoffRepo<'a> {
    pool: &'a PgPool,
    settings: &'a QuerySettings,
}

impl<'a> DropoffRepo<'a> {
    pub fn new(pool: &'a PgPool, settings: &'a QuerySettings) -> Self {
        Self { pool, settings }
    }

    /// Drop-offs near `center` as a GeoJSON feature collection.
    ///
    /// Applies `settings.timeout` when set. Dropping the returned future
    /// (e.g. on client disconnect) abandons the query and frees its
    /// connection.
    pub async fn nearby(&self, center: Coordinate) -> Result<FeatureCollection, QueryError> {
        let query = ProximityQuery::new(center, self.settings);

        tracing::debug!(
            lat = center.latitude,
            lng = center.longitude,
            table = %self.settings.table,
            radius_m = query.radius_meters,
            limit = query.row_limit,
            "proximity query"
        );

        match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, query.execute(self.pool))
                .await
                .map_err(|_| QueryError::Timeout { limit })?,
            None => query.execute(self.pool).await,
        }
    }

    /// Parse raw `centerLat` / `centerLng` strings, then run `nearby`.
    pub async fn nearby_raw(&self, lat: &str, lng: &str) -> Result<FeatureCollection, QueryError> {
        let center = Coordinate::parse(lat, lng)?;
        self.nearby(center).await
    }
}
