//! Platform feature catalog repository.

use sqlx::PgPool;

use crate::entities::PlatformFeatureEntity;
use crate::metrics::QueryTimer;

/// Read access to the platform_features table.
#[derive(Clone)]
pub struct PlatformFeatureRepository {
    pool: PgPool,
}

impl PlatformFeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All feature definitions with `active = true`.
    pub async fn list_active(&self) -> Result<Vec<PlatformFeatureEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_features");
        let result = sqlx::query_as::<_, PlatformFeatureEntity>(
            r#"
            SELECT feature_id, name, description, config_key, plan_key, category,
                   plan_type, depends_on, has_usage_limit, default_limit,
                   usage_limit_unit, display_order, active, created_at, updated_at
            FROM platform_features
            WHERE active = true
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record(&result);
        result
    }
}
