//! System configuration repository.

use sqlx::PgPool;

use crate::entities::SystemConfigEntity;
use crate::metrics::QueryTimer;

/// Read access to the system_config table.
#[derive(Clone)]
pub struct SystemConfigRepository {
    pool: PgPool,
}

impl SystemConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The configuration document with the given identifier, if any.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<SystemConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_system_config");
        let result = sqlx::query_as::<_, SystemConfigEntity>(
            r#"
            SELECT id, features, updated_at
            FROM system_config
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record(&result);
        result
    }
}
