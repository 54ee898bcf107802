//! MySQL implementation of the UserRepository trait.
//!
//! Emails are stored lower-cased so lookups and the unique index are
//! case-insensitive.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::user::User;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::UserRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, like_pattern, push_page, query_error, uuid_column,
    write_error,
};

const COLUMNS: &str = r#"
    id, name, email, password_hash, gender, phone, blood_type, birth_date,
    address, wallet_address, role, url_file, public_id, verify_email_token,
    reset_password_token, is_verified, created_at, updated_at
"#;

const SORTABLE: &[&str] = &["created_at", "updated_at", "name", "email"];

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            gender: column(row, "gender")?,
            phone: column(row, "phone")?,
            blood_type: column(row, "blood_type")?,
            birth_date: column(row, "birth_date")?,
            address: column(row, "address")?,
            wallet_address: column(row, "wallet_address")?,
            role: enum_column(row, "role")?,
            url_file: column(row, "url_file")?,
            public_id: column(row, "public_id")?,
            verify_email_token: column(row, "verify_email_token")?,
            reset_password_token: column(row, "reset_password_token")?,
            is_verified: column(row, "is_verified")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn find_one(&self, predicate: &str, value: String) -> DomainResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", COLUMNS, predicate);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    fn push_search(builder: &mut QueryBuilder<'_, sqlx::MySql>, query: &PageQuery) {
        if let Some(term) = query.search_term() {
            let pattern = like_pattern(&term);
            builder
                .push(" WHERE (LOWER(name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(email) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.find_one("email", email.trim().to_lowercase()).await
    }

    async fn find_by_verify_token(&self, token: &str) -> DomainResult<Option<User>> {
        self.find_one("verify_email_token", token.to_string()).await
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, gender, phone, blood_type,
                birth_date, address, wallet_address, role, url_file, public_id,
                verify_email_token, reset_password_token, is_verified,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(user.email.to_lowercase())
            .bind(&user.password_hash)
            .bind(&user.gender)
            .bind(&user.phone)
            .bind(&user.blood_type)
            .bind(user.birth_date)
            .bind(&user.address)
            .bind(&user.wallet_address)
            .bind(user.role.as_str())
            .bind(&user.url_file)
            .bind(&user.public_id)
            .bind(&user.verify_email_token)
            .bind(&user.reset_password_token)
            .bind(user.is_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, "Email sudah digunakan"))?;

        tracing::debug!(user_id = %user.id, "user row inserted");
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let query = r#"
            UPDATE users SET
                name = ?, email = ?, password_hash = ?, gender = ?, phone = ?,
                blood_type = ?, birth_date = ?, address = ?, wallet_address = ?, role = ?,
                url_file = ?, public_id = ?, verify_email_token = ?,
                reset_password_token = ?, is_verified = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(user.email.to_lowercase())
            .bind(&user.password_hash)
            .bind(&user.gender)
            .bind(&user.phone)
            .bind(&user.blood_type)
            .bind(user.birth_date)
            .bind(&user.address)
            .bind(&user.wallet_address)
            .bind(user.role.as_str())
            .bind(&user.url_file)
            .bind(&user.public_id)
            .bind(&user.verify_email_token)
            .bind(&user.reset_password_token)
            .bind(user.is_verified)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, "Email sudah digunakan"))?;

        // MySQL reports zero affected rows for a no-op update, so confirm existence
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found("user"));
        }
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &PageQuery) -> DomainResult<Paginated<User>> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM users");
        Self::push_search(&mut count, query);
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} FROM users", COLUMNS));
        Self::push_search(&mut select, query);
        push_page(&mut select, query, SORTABLE, "");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(items, total))
    }

    async fn count(&self) -> DomainResult<u64> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM users");
        fetch_total(&mut count, &self.pool).await
    }
}
