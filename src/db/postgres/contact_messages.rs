use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::super::{
    error::{DbError, Result},
    models::{ContactMessageRow, NewContactMessage},
    repositories::ContactMessagesRepository,
};

const MESSAGE_COLUMNS: &str = "id, name, email, topic, message, created_at";

pub(crate) struct PgContactMessagesRepo {
    pool: Arc<Pool<Postgres>>,
}

impl PgContactMessagesRepo {
    pub fn new(pool: Arc<Pool<Postgres>>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &Pool<Postgres> {
        self.pool.as_ref()
    }
}

#[async_trait]
impl ContactMessagesRepository for PgContactMessagesRepo {
    async fn add_message(&self, new_message: &NewContactMessage) -> Result<ContactMessageRow> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            r#"
                INSERT INTO contact_messages (name, email, topic, message)
                VALUES ($1, $2, $3, $4)
                RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(&new_message.name)
        .bind(&new_message.email)
        .bind(&new_message.topic)
        .bind(&new_message.message)
        .fetch_one(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(row)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactMessageRow>> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(&format!(
            r#"
                SELECT {MESSAGE_COLUMNS}
                FROM contact_messages
                ORDER BY created_at DESC
                LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(DbError::Query)?;

        Ok(rows)
    }
}
