//! MySQL implementation of the DonationRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::donation::{Donation, PaymentStatus};
use dc_core::domain::value_objects::DonationFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::DonationRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, like_pattern, push_page, query_error, uuid_column,
    write_error,
};

const COLUMNS: &str = r#"
    d.id, d.user_id, d.order_id, d.amount, d.status, d.snap_token,
    d.redirect_url, d.transaction_time, d.created_at, d.updated_at
"#;

const FROM: &str = "FROM donations d LEFT JOIN users u ON u.id = d.user_id";

const SORTABLE: &[&str] = &["created_at", "updated_at", "amount", "status", "transaction_time"];

pub struct MySqlDonationRepository {
    pool: MySqlPool,
}

impl MySqlDonationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_donation(row: &MySqlRow) -> Result<Donation, DomainError> {
        Ok(Donation {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            order_id: column(row, "order_id")?,
            amount: column(row, "amount")?,
            status: enum_column(row, "status")?,
            snap_token: column(row, "snap_token")?,
            redirect_url: column(row, "redirect_url")?,
            transaction_time: column(row, "transaction_time")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &DonationFilter,
        search: Option<&str>,
    ) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND d.user_id = ").push_bind(user_id.to_string());
        }
        if let Some(order_id) = &filter.order_id {
            builder.push(" AND d.order_id = ").push_bind(order_id.clone());
        }
        if let Some(status) = filter.status {
            builder.push(" AND d.status = ").push_bind(status.as_str());
        }
        if let Some(term) = search {
            let pattern = like_pattern(term);
            builder
                .push(" AND (LOWER(u.name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(d.order_id) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    async fn find_one(&self, predicate: &str, value: String) -> DomainResult<Option<Donation>> {
        let query = format!(
            "SELECT {} FROM donations d WHERE d.{} = ? LIMIT 1",
            COLUMNS, predicate
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_donation).transpose()
    }
}

#[async_trait]
impl DonationRepository for MySqlDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Donation>> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_order_id(&self, order_id: &str) -> DomainResult<Option<Donation>> {
        self.find_one("order_id", order_id.to_string()).await
    }

    async fn create(&self, donation: Donation) -> DomainResult<Donation> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                id, user_id, order_id, amount, status, snap_token,
                redirect_url, transaction_time, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(donation.id.to_string())
        .bind(donation.user_id.to_string())
        .bind(&donation.order_id)
        .bind(donation.amount)
        .bind(donation.status.as_str())
        .bind(&donation.snap_token)
        .bind(&donation.redirect_url)
        .bind(donation.transaction_time)
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "order id donasi sudah digunakan"))?;
        Ok(donation)
    }

    async fn update(&self, donation: Donation) -> DomainResult<Donation> {
        sqlx::query(
            r#"
            UPDATE donations SET
                status = ?, snap_token = ?, redirect_url = ?,
                transaction_time = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(donation.status.as_str())
        .bind(&donation.snap_token)
        .bind(&donation.redirect_url)
        .bind(donation.transaction_time)
        .bind(donation.updated_at)
        .bind(donation.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(donation)
    }

    async fn list(
        &self,
        filter: &DonationFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Donation>> {
        let search = query.search_term();

        let mut count = QueryBuilder::new(format!("SELECT COUNT(*) AS total {}", FROM));
        Self::push_conditions(&mut count, filter, search.as_deref());
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} {}", COLUMNS, FROM));
        Self::push_conditions(&mut select, filter, search.as_deref());
        push_page(&mut select, query, SORTABLE, "d");

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

    async fn total_amount(&self, status: PaymentStatus) -> DomainResult<i64> {
        // SUM over BIGINT yields DECIMAL in MySQL
        let row = sqlx::query(
            "SELECT CAST(COALESCE(SUM(amount), 0) AS SIGNED) AS total FROM donations WHERE status = ?",
        )
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;
        column(&row, "total")
    }
}
