//! MySQL implementation of the HospitalRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::hospital::Hospital;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::HospitalRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{column, fetch_total, like_pattern, push_page, query_error, uuid_column};

const COLUMNS: &str =
    "id, name, address, city, province, latitude, longitude, created_at, updated_at";

const SORTABLE: &[&str] = &["created_at", "updated_at", "name", "city", "province"];

pub struct MySqlHospitalRepository {
    pool: MySqlPool,
}

impl MySqlHospitalRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_hospital(row: &MySqlRow) -> Result<Hospital, DomainError> {
        Ok(Hospital {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
            address: column(row, "address")?,
            city: column(row, "city")?,
            province: column(row, "province")?,
            latitude: column(row, "latitude")?,
            longitude: column(row, "longitude")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_search(builder: &mut QueryBuilder<'_, MySql>, query: &PageQuery) {
        if let Some(term) = query.search_term() {
            let pattern = like_pattern(&term);
            builder
                .push(" WHERE (LOWER(name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(city) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(province) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl HospitalRepository for MySqlHospitalRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Hospital>> {
        let query = format!("SELECT {} FROM hospitals WHERE id = ? LIMIT 1", COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_hospital).transpose()
    }

    async fn create(&self, hospital: Hospital) -> DomainResult<Hospital> {
        sqlx::query(
            r#"
            INSERT INTO hospitals (
                id, name, address, city, province, latitude, longitude,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(hospital.id.to_string())
        .bind(&hospital.name)
        .bind(&hospital.address)
        .bind(&hospital.city)
        .bind(&hospital.province)
        .bind(hospital.latitude)
        .bind(hospital.longitude)
        .bind(hospital.created_at)
        .bind(hospital.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(hospital)
    }

    async fn update(&self, hospital: Hospital) -> DomainResult<Hospital> {
        sqlx::query(
            r#"
            UPDATE hospitals SET
                name = ?, address = ?, city = ?, province = ?,
                latitude = ?, longitude = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&hospital.name)
        .bind(&hospital.address)
        .bind(&hospital.city)
        .bind(&hospital.province)
        .bind(hospital.latitude)
        .bind(hospital.longitude)
        .bind(hospital.updated_at)
        .bind(hospital.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(hospital)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM hospitals WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let referenced =
                    matches!(&e, sqlx::Error::Database(db) if db.is_foreign_key_violation());
                if referenced {
                    DomainError::conflict("rumah sakit masih digunakan")
                } else {
                    query_error(e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &PageQuery) -> DomainResult<Paginated<Hospital>> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM hospitals");
        Self::push_search(&mut count, query);
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} FROM hospitals", COLUMNS));
        Self::push_search(&mut select, query);
        push_page(&mut select, query, SORTABLE, "");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_hospital)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }
}
