use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::AdvertiserRepository;
use crate::core::error::{map_write_error, AppError, Result};
use crate::features::advertisers::models::{Advertiser, AdvertiserFilter, NewAdvertiser};
use crate::shared::types::PageRequest;

pub const ADVERTISER_COLUMNS: &str = "id, short_code, business_name, phone_number, \
    whatsapp_number, logo_url, is_premium, priority_score, subscription_expiry, \
    targeted_cities, targeted_services, description, gallery, reviews, is_active, \
    created_at, updated_at";

// Nullable parameters: $1 city, $2 service, $3 is_premium, $4 is_active, $5 search
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::text IS NULL OR $1 = ANY(targeted_cities))
      AND ($2::text IS NULL OR $2 = ANY(targeted_services))
      AND ($3::bool IS NULL OR is_premium = $3)
      AND ($4::bool IS NULL OR is_active = $4)
      AND ($5::text IS NULL OR business_name ILIKE '%' || $5 || '%' OR short_code = lower($5))
"#;

/// Postgres implementation of [`AdvertiserRepository`]
pub struct PgAdvertiserRepository {
    pool: PgPool,
}

impl PgAdvertiserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert an advertiser on any executor, so approval can run it inside its transaction
pub async fn insert_advertiser<'e, E>(executor: E, new: &NewAdvertiser) -> sqlx::Result<Advertiser>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        INSERT INTO advertisers (
            id, short_code, business_name, phone_number, whatsapp_number, logo_url,
            is_premium, priority_score, subscription_expiry, targeted_cities,
            targeted_services, description, gallery, reviews, is_active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING {}
        "#,
        ADVERTISER_COLUMNS
    );

    sqlx::query_as::<_, Advertiser>(&sql)
        .bind(Uuid::now_v7())
        .bind(&new.short_code)
        .bind(&new.business_name)
        .bind(&new.phone_number)
        .bind(&new.whatsapp_number)
        .bind(&new.logo_url)
        .bind(new.is_premium)
        .bind(new.priority_score)
        .bind(new.subscription_expiry)
        .bind(&new.targeted_cities)
        .bind(&new.targeted_services)
        .bind(&new.description)
        .bind(&new.gallery)
        .bind(Json(&new.reviews))
        .bind(new.is_active)
        .fetch_one(executor)
        .await
}

fn read_error(context: &str, e: sqlx::Error) -> AppError {
    tracing::error!("Failed to {}: {:?}", context, e);
    AppError::Database(e)
}

#[async_trait]
impl AdvertiserRepository for PgAdvertiserRepository {
    async fn list(
        &self,
        filter: &AdvertiserFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Advertiser>> {
        let sql = format!(
            "SELECT {} FROM advertisers {} ORDER BY created_at DESC OFFSET $6 LIMIT $7",
            ADVERTISER_COLUMNS, FILTER_CLAUSE
        );

        sqlx::query_as::<_, Advertiser>(&sql)
            .bind(filter.city.as_deref())
            .bind(filter.service.as_deref())
            .bind(filter.is_premium)
            .bind(filter.is_active)
            .bind(filter.search.as_deref())
            .bind(page.map_or(0, |p| p.offset))
            // LIMIT NULL means no limit
            .bind(page.map(|p| p.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("list advertisers", e))
    }

    async fn count(&self, filter: &AdvertiserFilter) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM advertisers {}", FILTER_CLAUSE);

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.city.as_deref())
            .bind(filter.service.as_deref())
            .bind(filter.is_premium)
            .bind(filter.is_active)
            .bind(filter.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("count advertisers", e))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Advertiser>> {
        let sql = format!("SELECT {} FROM advertisers WHERE id = $1", ADVERTISER_COLUMNS);

        sqlx::query_as::<_, Advertiser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("get advertiser", e))
    }

    async fn get_by_short_code(&self, short_code: &str) -> Result<Option<Advertiser>> {
        let sql = format!(
            "SELECT {} FROM advertisers WHERE short_code = $1",
            ADVERTISER_COLUMNS
        );

        sqlx::query_as::<_, Advertiser>(&sql)
            .bind(short_code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("get advertiser by short code", e))
    }

    async fn short_code_exists(&self, short_code: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM advertisers WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("check short code", e))
    }

    async fn create(&self, new: NewAdvertiser) -> Result<Advertiser> {
        let advertiser = insert_advertiser(&self.pool, &new)
            .await
            .map_err(|e| map_write_error(e, "create advertiser"))?;

        tracing::info!(
            "Advertiser created: {} ({})",
            advertiser.id,
            advertiser.short_code
        );
        Ok(advertiser)
    }

    async fn update(&self, advertiser: &Advertiser) -> Result<Option<Advertiser>> {
        let sql = format!(
            r#"
            UPDATE advertisers SET
                business_name = $2,
                phone_number = $3,
                whatsapp_number = $4,
                logo_url = $5,
                is_premium = $6,
                priority_score = $7,
                subscription_expiry = $8,
                targeted_cities = $9,
                targeted_services = $10,
                description = $11,
                gallery = $12,
                reviews = $13,
                is_active = $14,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ADVERTISER_COLUMNS
        );

        sqlx::query_as::<_, Advertiser>(&sql)
            .bind(advertiser.id)
            .bind(&advertiser.business_name)
            .bind(&advertiser.phone_number)
            .bind(&advertiser.whatsapp_number)
            .bind(&advertiser.logo_url)
            .bind(advertiser.is_premium)
            .bind(advertiser.priority_score)
            .bind(advertiser.subscription_expiry)
            .bind(&advertiser.targeted_cities)
            .bind(&advertiser.targeted_services)
            .bind(&advertiser.description)
            .bind(&advertiser.gallery)
            .bind(&advertiser.reviews)
            .bind(advertiser.is_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "update advertiser"))
    }

    async fn toggle_premium(
        &self,
        id: Uuid,
        expiry_when_enabled: DateTime<Utc>,
    ) -> Result<Option<Advertiser>> {
        // SET expressions see the pre-update row
        let sql = format!(
            r#"
            UPDATE advertisers SET
                is_premium = NOT is_premium,
                subscription_expiry = CASE WHEN is_premium THEN NULL ELSE $2 END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ADVERTISER_COLUMNS
        );

        sqlx::query_as::<_, Advertiser>(&sql)
            .bind(id)
            .bind(expiry_when_enabled)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "toggle advertiser premium"))
    }

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Advertiser>> {
        let sql = format!(
            r#"
            UPDATE advertisers SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ADVERTISER_COLUMNS
        );

        sqlx::query_as::<_, Advertiser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "toggle advertiser active"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM advertisers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "delete advertiser"))?;

        Ok(result.rows_affected() > 0)
    }
}
