//! MySQL implementation of the HealthPassportRepository trait.
//!
//! `passport_number` and `user_id` carry unique indexes; a clash on either is
//! reported as a conflict so the service can retry with a fresh number.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::health_passport::HealthPassport;
use dc_core::domain::value_objects::PassportFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::HealthPassportRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, like_pattern, push_page, query_error, uuid_column,
    write_error,
};

const COLUMNS: &str = r#"
    hp.id, hp.user_id, hp.passport_number, hp.expiry_date, hp.status,
    hp.created_at, hp.updated_at
"#;

const FROM: &str = "FROM health_passports hp LEFT JOIN users u ON u.id = hp.user_id";

const SORTABLE: &[&str] = &["created_at", "updated_at", "expiry_date", "status"];

const DUPLICATE_NUMBER: &str = "nomor paspor kesehatan sudah digunakan";

pub struct MySqlHealthPassportRepository {
    pool: MySqlPool,
}

impl MySqlHealthPassportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_passport(row: &MySqlRow) -> Result<HealthPassport, DomainError> {
        Ok(HealthPassport {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            passport_number: column(row, "passport_number")?,
            expiry_date: column(row, "expiry_date")?,
            status: enum_column(row, "status")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &PassportFilter,
        search: Option<&str>,
    ) {
        builder.push(" WHERE 1 = 1");
        if let Some(status) = filter.status {
            builder.push(" AND hp.status = ").push_bind(status.as_str());
        }
        if let Some(term) = search {
            let pattern = like_pattern(term);
            builder
                .push(" AND (LOWER(hp.passport_number) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(u.name) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    async fn find_one(&self, predicate: &str, value: String) -> DomainResult<Option<HealthPassport>> {
        let query = format!(
            "SELECT {} FROM health_passports hp WHERE hp.{} = ? LIMIT 1",
            COLUMNS, predicate
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_passport).transpose()
    }
}

#[async_trait]
impl HealthPassportRepository for MySqlHealthPassportRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<HealthPassport>> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<HealthPassport>> {
        self.find_one("user_id", user_id.to_string()).await
    }

    async fn create(&self, passport: HealthPassport) -> DomainResult<HealthPassport> {
        sqlx::query(
            r#"
            INSERT INTO health_passports (
                id, user_id, passport_number, expiry_date, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(passport.id.to_string())
        .bind(passport.user_id.to_string())
        .bind(&passport.passport_number)
        .bind(passport.expiry_date)
        .bind(passport.status.as_str())
        .bind(passport.created_at)
        .bind(passport.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, DUPLICATE_NUMBER))?;
        Ok(passport)
    }

    async fn update(&self, passport: HealthPassport) -> DomainResult<HealthPassport> {
        sqlx::query(
            r#"
            UPDATE health_passports SET
                passport_number = ?, expiry_date = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&passport.passport_number)
        .bind(passport.expiry_date)
        .bind(passport.status.as_str())
        .bind(passport.updated_at)
        .bind(passport.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, DUPLICATE_NUMBER))?;
        Ok(passport)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM health_passports WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &PassportFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<HealthPassport>> {
        let search = query.search_term();

        let mut count = QueryBuilder::new(format!("SELECT COUNT(*) AS total {}", FROM));
        Self::push_conditions(&mut count, filter, search.as_deref());
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} {}", COLUMNS, FROM));
        Self::push_conditions(&mut select, filter, search.as_deref());
        push_page(&mut select, query, SORTABLE, "hp");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_passport)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }
}
