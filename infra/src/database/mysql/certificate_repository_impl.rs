//! MySQL implementation of the CertificateRepository trait.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::certificate::Certificate;
use dc_core::domain::value_objects::CertificateFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::CertificateRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, fetch_total, like_pattern, push_page, query_error, uuid_column, write_error,
};

const COLUMNS: &str = r#"
    id, user_id, donation_id, certificate_number, digital_signature,
    tx_hash, issued_at, created_at, updated_at
"#;

const SORTABLE: &[&str] = &["created_at", "issued_at", "certificate_number"];

pub struct MySqlCertificateRepository {
    pool: MySqlPool,
}

impl MySqlCertificateRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_certificate(row: &MySqlRow) -> Result<Certificate, DomainError> {
        Ok(Certificate {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            donation_id: uuid_column(row, "donation_id")?,
            certificate_number: column(row, "certificate_number")?,
            digital_signature: column(row, "digital_signature")?,
            tx_hash: column(row, "tx_hash")?,
            issued_at: column(row, "issued_at")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &CertificateFilter,
        search: Option<&str>,
    ) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.to_string());
        }
        if let Some(term) = search {
            builder
                .push(" AND LOWER(certificate_number) LIKE ")
                .push_bind(like_pattern(term));
        }
    }

    async fn find_one(&self, predicate: &str, value: String) -> DomainResult<Option<Certificate>> {
        let query = format!(
            "SELECT {} FROM certificates WHERE {} = ? LIMIT 1",
            COLUMNS, predicate
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_certificate).transpose()
    }
}

#[async_trait]
impl CertificateRepository for MySqlCertificateRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Certificate>> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_number(&self, number: &str) -> DomainResult<Option<Certificate>> {
        self.find_one("certificate_number", number.to_string()).await
    }

    async fn find_by_donation(&self, donation_id: Uuid) -> DomainResult<Option<Certificate>> {
        self.find_one("donation_id", donation_id.to_string()).await
    }

    async fn create(&self, certificate: Certificate) -> DomainResult<Certificate> {
        sqlx::query(
            r#"
            INSERT INTO certificates (
                id, user_id, donation_id, certificate_number, digital_signature,
                tx_hash, issued_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(certificate.id.to_string())
        .bind(certificate.user_id.to_string())
        .bind(certificate.donation_id.to_string())
        .bind(&certificate.certificate_number)
        .bind(&certificate.digital_signature)
        .bind(&certificate.tx_hash)
        .bind(certificate.issued_at)
        .bind(certificate.created_at)
        .bind(certificate.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "nomor sertifikat sudah digunakan"))?;
        Ok(certificate)
    }

    async fn record_mint(&self, certificate: Certificate) -> DomainResult<Certificate> {
        let result = sqlx::query("UPDATE certificates SET tx_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&certificate.tx_hash)
            .bind(certificate.updated_at)
            .bind(certificate.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("sertifikat"));
        }
        Ok(certificate)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &CertificateFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<Certificate>> {
        let search = query.search_term();

        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM certificates");
        Self::push_conditions(&mut count, filter, search.as_deref());
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} FROM certificates", COLUMNS));
        Self::push_conditions(&mut select, filter, search.as_deref());
        push_page(&mut select, query, SORTABLE, "");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_certificate)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }
}
