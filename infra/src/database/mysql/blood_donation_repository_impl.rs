//! MySQL implementation of the BloodDonationRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::blood_donation::BloodDonation;
use dc_core::domain::value_objects::BloodDonationFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::BloodDonationRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{column, enum_column, fetch_total, push_page, query_error, uuid_column};

const COLUMNS: &str = r#"
    id, user_id, hospital_id, registration_id, donation_date, blood_type,
    status, image_url, image_public_id, created_at, updated_at
"#;

const SORTABLE: &[&str] = &["created_at", "updated_at", "donation_date", "status"];

pub struct MySqlBloodDonationRepository {
    pool: MySqlPool,
}

impl MySqlBloodDonationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_donation(row: &MySqlRow) -> Result<BloodDonation, DomainError> {
        Ok(BloodDonation {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            hospital_id: uuid_column(row, "hospital_id")?,
            registration_id: uuid_column(row, "registration_id")?,
            donation_date: column(row, "donation_date")?,
            blood_type: column(row, "blood_type")?,
            status: enum_column(row, "status")?,
            image_url: column(row, "image_url")?,
            image_public_id: column(row, "image_public_id")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(builder: &mut QueryBuilder<'_, MySql>, filter: &BloodDonationFilter) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.to_string());
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(blood_type) = &filter.blood_type {
            builder
                .push(" AND UPPER(blood_type) = ")
                .push_bind(blood_type.to_uppercase());
        }
    }
}

#[async_trait]
impl BloodDonationRepository for MySqlBloodDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<BloodDonation>> {
        let query = format!("SELECT {} FROM blood_donations WHERE id = ? LIMIT 1", COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_donation).transpose()
    }

    async fn create(&self, donation: BloodDonation) -> DomainResult<BloodDonation> {
        sqlx::query(
            r#"
            INSERT INTO blood_donations (
                id, user_id, hospital_id, registration_id, donation_date,
                blood_type, status, image_url, image_public_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(donation.id.to_string())
        .bind(donation.user_id.to_string())
        .bind(donation.hospital_id.to_string())
        .bind(donation.registration_id.to_string())
        .bind(donation.donation_date)
        .bind(&donation.blood_type)
        .bind(donation.status.as_str())
        .bind(&donation.image_url)
        .bind(&donation.image_public_id)
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(donation)
    }

    async fn update(&self, donation: BloodDonation) -> DomainResult<BloodDonation> {
        sqlx::query(
            r#"
            UPDATE blood_donations SET
                hospital_id = ?, donation_date = ?, blood_type = ?, status = ?,
                image_url = ?, image_public_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(donation.hospital_id.to_string())
        .bind(donation.donation_date)
        .bind(&donation.blood_type)
        .bind(donation.status.as_str())
        .bind(&donation.image_url)
        .bind(&donation.image_public_id)
        .bind(donation.updated_at)
        .bind(donation.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(donation)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM blood_donations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &BloodDonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodDonation>> {
        let total = self.count(filter).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} FROM blood_donations", COLUMNS));
        Self::push_conditions(&mut select, filter);
        push_page(&mut select, query, SORTABLE, "");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_donation)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }

    async fn count(&self, filter: &BloodDonationFilter) -> DomainResult<u64> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM blood_donations");
        Self::push_conditions(&mut count, filter);
        fetch_total(&mut count, &self.pool).await
    }

    async fn count_donors(&self) -> DomainResult<u64> {
        let mut count =
            QueryBuilder::new("SELECT COUNT(DISTINCT user_id) AS total FROM blood_donations");
        fetch_total(&mut count, &self.pool).await
    }

    async fn latest_for_user(&self, user_id: Uuid) -> DomainResult<Option<BloodDonation>> {
        let query = format!(
            r#"
            SELECT {} FROM blood_donations
            WHERE user_id = ?
            ORDER BY donation_date DESC, created_at DESC
            LIMIT 1
            "#,
            COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_donation).transpose()
    }
}
