use async_trait::async_trait;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::ser;
use crate::repository::{ProfileRepository, StorageError};

#[async_trait]
impl ProfileRepository for SqliteRepository {
    async fn is_admin(&self, user_id: &str) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT is_admin FROM profiles WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(false);
        };
        let flag: i64 = row.try_get("is_admin").map_err(ser)?;
        Ok(flag != 0)
    }

    async fn set_admin(&self, user_id: &str, is_admin: bool) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, is_admin)
            VALUES (?1, ?2)
            ON CONFLICT(user_id) DO UPDATE SET is_admin = excluded.is_admin
            ",
        )
        .bind(user_id)
        .bind(i64::from(is_admin))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
