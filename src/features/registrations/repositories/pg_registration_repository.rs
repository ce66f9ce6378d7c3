use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::RegistrationRepository;
use crate::core::error::{map_write_error, AppError, Result};
use crate::features::advertisers::models::{Advertiser, NewAdvertiser};
use crate::features::advertisers::repositories::insert_advertiser;
use crate::features::registrations::models::{
    NewRegistrationRequest, RegistrationRequest, RequestStatus,
};
use crate::shared::types::PageRequest;

const REQUEST_COLUMNS: &str = "id, business_name, contact_name, phone_number, whatsapp_number, \
    description, targeted_cities, targeted_services, selected_plan, logo_url, gallery, status, \
    rejection_reason, advertiser_id, created_at, resolved_at";

/// Postgres implementation of [`RegistrationRepository`]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_error(context: &str, e: sqlx::Error) -> AppError {
    tracing::error!("Failed to {}: {:?}", context, e);
    AppError::Database(e)
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn list(
        &self,
        status: Option<RequestStatus>,
        page: PageRequest,
    ) -> Result<Vec<RegistrationRequest>> {
        let sql = format!(
            r#"
            SELECT {} FROM registration_requests
            WHERE ($1::request_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
            REQUEST_COLUMNS
        );

        sqlx::query_as::<_, RegistrationRequest>(&sql)
            .bind(status)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("list registration requests", e))
    }

    async fn count(&self, status: Option<RequestStatus>) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registration_requests \
             WHERE ($1::request_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("count registration requests", e))
    }

    async fn get(&self, id: Uuid) -> Result<Option<RegistrationRequest>> {
        let sql = format!(
            "SELECT {} FROM registration_requests WHERE id = $1",
            REQUEST_COLUMNS
        );

        sqlx::query_as::<_, RegistrationRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("get registration request", e))
    }

    async fn create(&self, new: NewRegistrationRequest) -> Result<RegistrationRequest> {
        let sql = format!(
            r#"
            INSERT INTO registration_requests (
                id, business_name, contact_name, phone_number, whatsapp_number, description,
                targeted_cities, targeted_services, selected_plan, logo_url, gallery
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        );

        sqlx::query_as::<_, RegistrationRequest>(&sql)
            .bind(Uuid::now_v7())
            .bind(&new.business_name)
            .bind(&new.contact_name)
            .bind(&new.phone_number)
            .bind(&new.whatsapp_number)
            .bind(&new.description)
            .bind(&new.targeted_cities)
            .bind(&new.targeted_services)
            .bind(new.selected_plan)
            .bind(&new.logo_url)
            .bind(&new.gallery)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "create registration request"))
    }

    async fn approve(
        &self,
        id: Uuid,
        new: NewAdvertiser,
    ) -> Result<Option<(RegistrationRequest, Advertiser)>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_write_error(e, "begin approval"))?;

        // Row lock: a concurrent approval waits here and then sees a non-pending row
        let claimed = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE registration_requests
            SET status = 'approved', resolved_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "claim registration request"))?;

        if claimed.is_none() {
            // Dropping the transaction rolls it back
            return Ok(None);
        }

        let advertiser = insert_advertiser(&mut *tx, &new)
            .await
            .map_err(|e| map_write_error(e, "create advertiser from request"))?;

        let link_sql = format!(
            "UPDATE registration_requests SET advertiser_id = $2 WHERE id = $1 RETURNING {}",
            REQUEST_COLUMNS
        );
        let request = sqlx::query_as::<_, RegistrationRequest>(&link_sql)
            .bind(id)
            .bind(advertiser.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "link advertiser to request"))?;

        tx.commit()
            .await
            .map_err(|e| map_write_error(e, "commit approval"))?;

        Ok(Some((request, advertiser)))
    }

    async fn reject(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<Option<RegistrationRequest>> {
        let sql = format!(
            r#"
            UPDATE registration_requests
            SET status = 'rejected', rejection_reason = $2, resolved_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        );

        sqlx::query_as::<_, RegistrationRequest>(&sql)
            .bind(id)
            .bind(reason)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "reject registration request"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM registration_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "delete registration request"))?;

        Ok(result.rows_affected() > 0)
    }
}
