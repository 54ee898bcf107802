//! MySQL implementation of the DonorRegistrationRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::donor_registration::{DonorRegistration, RegistrationStatus};
use dc_core::domain::value_objects::RegistrationFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::DonorRegistrationRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, opt_uuid_column, push_page, query_error, uuid_column,
};

const COLUMNS: &str =
    "id, user_id, request_id, schedule_id, status, notes, created_at, updated_at";

const SORTABLE: &[&str] = &["created_at", "updated_at", "status"];

pub struct MySqlDonorRegistrationRepository {
    pool: MySqlPool,
}

impl MySqlDonorRegistrationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_registration(row: &MySqlRow) -> Result<DonorRegistration, DomainError> {
        Ok(DonorRegistration {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            request_id: uuid_column(row, "request_id")?,
            schedule_id: opt_uuid_column(row, "schedule_id")?,
            status: enum_column(row, "status")?,
            notes: column(row, "notes")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(builder: &mut QueryBuilder<'_, MySql>, filter: &RegistrationFilter) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.to_string());
        }
        if let Some(request_id) = filter.request_id {
            builder.push(" AND request_id = ").push_bind(request_id.to_string());
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
    }
}

#[async_trait]
impl DonorRegistrationRepository for MySqlDonorRegistrationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DonorRegistration>> {
        let query = format!("SELECT {} FROM donor_registrations WHERE id = ? LIMIT 1", COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_registration).transpose()
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> DomainResult<Option<DonorRegistration>> {
        let query = format!(
            r#"
            SELECT {} FROM donor_registrations
            WHERE user_id = ? AND request_id = ? AND status <> ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(request_id.to_string())
            .bind(RegistrationStatus::Cancelled.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_registration).transpose()
    }

    async fn create(&self, registration: DonorRegistration) -> DomainResult<DonorRegistration> {
        sqlx::query(
            r#"
            INSERT INTO donor_registrations (
                id, user_id, request_id, schedule_id, status, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(registration.id.to_string())
        .bind(registration.user_id.to_string())
        .bind(registration.request_id.to_string())
        .bind(registration.schedule_id.map(|id| id.to_string()))
        .bind(registration.status.as_str())
        .bind(&registration.notes)
        .bind(registration.created_at)
        .bind(registration.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(registration)
    }

    async fn update(&self, registration: DonorRegistration) -> DomainResult<DonorRegistration> {
        sqlx::query(
            r#"
            UPDATE donor_registrations SET
                schedule_id = ?, status = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(registration.schedule_id.map(|id| id.to_string()))
        .bind(registration.status.as_str())
        .bind(&registration.notes)
        .bind(registration.updated_at)
        .bind(registration.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(registration)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM donor_registrations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &RegistrationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorRegistration>> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM donor_registrations");
        Self::push_conditions(&mut count, filter);
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select =
            QueryBuilder::new(format!("SELECT {} FROM donor_registrations", COLUMNS));
        Self::push_conditions(&mut select, filter);
        push_page(&mut select, query, SORTABLE, "");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_registration)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }
}
