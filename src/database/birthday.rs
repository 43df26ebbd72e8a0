use super::{Database, RosterStore, StoreError};
use async_trait::async_trait;

use crate::models::{BirthdayEntry, BirthdayRecord, Gender};

type BirthdayRow = (i64, String, i64, i64, Option<String>, Option<String>);

const SELECT_BIRTHDAYS: &str = "SELECT id, name, month, day, gender, discord_id FROM birthdays";

fn into_record((id, name, month, day, gender, discord_id): BirthdayRow) -> BirthdayRecord {
    BirthdayRecord {
        id,
        name,
        month: month as u32,
        day: day as u32,
        gender: gender.as_deref().and_then(Gender::from_tag),
        external_id: discord_id,
    }
}

#[async_trait]
impl RosterStore for Database {
    async fn insert(&self, entry: &BirthdayEntry) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO birthdays (name, month, day, gender, discord_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.name.as_str())
        .bind(entry.month as i64)
        .bind(entry.day as i64)
        .bind(entry.gender.map(|g| g.as_tag()))
        .bind(entry.external_id.as_deref())
        .execute(self.pool())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::AlreadyExists(entry.name.clone())
            }
            other => StoreError::from(other),
        })?;
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<BirthdayRecord>, StoreError> {
        let row: Option<BirthdayRow> = sqlx::query_as(&format!("{SELECT_BIRTHDAYS} WHERE name = ?"))
            .bind(name)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(into_record))
    }

    async fn get_all(&self) -> Result<Vec<BirthdayRecord>, StoreError> {
        let rows: Vec<BirthdayRow> =
            sqlx::query_as(&format!("{SELECT_BIRTHDAYS} ORDER BY month, day, id"))
                .fetch_all(self.pool())
                .await?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn get_by_month(&self, month: u32) -> Result<Vec<BirthdayRecord>, StoreError> {
        let rows: Vec<BirthdayRow> =
            sqlx::query_as(&format!("{SELECT_BIRTHDAYS} WHERE month = ? ORDER BY day, id"))
                .bind(month as i64)
                .fetch_all(self.pool())
                .await?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn get_by_date(&self, month: u32, day: u32) -> Result<Vec<BirthdayRecord>, StoreError> {
        let rows: Vec<BirthdayRow> = sqlx::query_as(&format!(
            "{SELECT_BIRTHDAYS} WHERE month = ? AND day = ? ORDER BY id"
        ))
        .bind(month as i64)
        .bind(day as i64)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn update(&self, entry: &BirthdayEntry) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE birthdays
            SET month = ?, day = ?, gender = ?, discord_id = ?, updated_at = CURRENT_TIMESTAMP
            WHERE name = ?
            "#,
        )
        .bind(entry.month as i64)
        .bind(entry.day as i64)
        .bind(entry.gender.map(|g| g.as_tag()))
        .bind(entry.external_id.as_deref())
        .bind(entry.name.as_str())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(entry.name.clone()));
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM birthdays WHERE name = ?")
            .bind(name)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }
}
