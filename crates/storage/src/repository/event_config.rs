use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::Result;
use crate::models::EventConfigKind;

pub struct EventConfigRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventConfigRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, event_id: Uuid, kind: EventConfigKind) -> Result<Option<Value>> {
        let config = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT config
            FROM event_configs
            WHERE event_id = $1 AND kind = $2
            "#,
        )
        .bind(event_id)
        .bind(kind.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(config.map(|Json(value)| value))
    }

    /// Writes a regenerated blob unless the stored one is frozen. The flag
    /// check and the write happen in one statement, so a concurrent release
    /// or publish is never overwritten. Returns false when frozen.
    pub async fn replace_unless_frozen(
        &self,
        event_id: Uuid,
        kind: EventConfigKind,
        config: &Value,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO event_configs (event_id, kind, config)
            VALUES ($1, $2, $3)
            ON CONFLICT (event_id, kind)
            DO UPDATE SET
                config = EXCLUDED.config,
                updated_at = CURRENT_TIMESTAMP
            WHERE NOT COALESCE((event_configs.config->>$4)::BOOLEAN, FALSE)
            "#,
        )
        .bind(event_id)
        .bind(kind.as_str())
        .bind(Json(config))
        .bind(kind.frozen_flag())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets the frozen flag in place and returns the updated blob, or `None`
    /// when nothing is stored yet.
    pub async fn freeze(&self, event_id: Uuid, kind: EventConfigKind) -> Result<Option<Value>> {
        let config = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            UPDATE event_configs
            SET config = jsonb_set(config, ARRAY[$3]::TEXT[], 'true'::JSONB),
                updated_at = CURRENT_TIMESTAMP
            WHERE event_id = $1 AND kind = $2
            RETURNING config
            "#,
        )
        .bind(event_id)
        .bind(kind.as_str())
        .bind(kind.frozen_flag())
        .fetch_optional(self.pool)
        .await?;

        Ok(config.map(|Json(value)| value))
    }
}
