//! MySQL implementation of the BloodRequestRepository trait.
//!
//! Blood requests and campaigns share the `blood_requests` table and are told
//! apart by `event_type`. Slot counters are changed with guarded updates so
//! concurrent registrations cannot overbook a campaign.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::blood_request::{BloodRequest, EventType, RequestStatus};
use dc_core::domain::value_objects::{BloodRequestFilter, RequestStats};
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::BloodRequestRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, like_pattern, push_page, query_error, uuid_column,
};

const COLUMNS: &str = r#"
    br.id, br.user_id, br.hospital_id, br.patient_name, br.event_name,
    br.event_date, br.start_time, br.end_time, br.slots_available,
    br.slots_booked, br.blood_type, br.quantity, br.urgency_level,
    br.diagnosis, br.status, br.expiry_date, br.event_type, br.image_url,
    br.image_public_id, br.created_at, br.updated_at
"#;

const FROM: &str = r#"
    FROM blood_requests br
    LEFT JOIN users u ON u.id = br.user_id
    LEFT JOIN hospitals h ON h.id = br.hospital_id
"#;

const SORTABLE: &[&str] = &[
    "created_at",
    "updated_at",
    "event_date",
    "quantity",
    "urgency_level",
    "status",
];

pub struct MySqlBloodRequestRepository {
    pool: MySqlPool,
}

impl MySqlBloodRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &MySqlRow) -> Result<BloodRequest, DomainError> {
        Ok(BloodRequest {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            hospital_id: uuid_column(row, "hospital_id")?,
            patient_name: column(row, "patient_name")?,
            event_name: column(row, "event_name")?,
            event_date: column(row, "event_date")?,
            start_time: column(row, "start_time")?,
            end_time: column(row, "end_time")?,
            slots_available: column(row, "slots_available")?,
            slots_booked: column(row, "slots_booked")?,
            blood_type: column(row, "blood_type")?,
            quantity: column(row, "quantity")?,
            urgency_level: enum_column(row, "urgency_level")?,
            diagnosis: column(row, "diagnosis")?,
            status: enum_column(row, "status")?,
            expiry_date: column(row, "expiry_date")?,
            event_type: enum_column(row, "event_type")?,
            image_url: column(row, "image_url")?,
            image_public_id: column(row, "image_public_id")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    /// Translate the filter and search term into `WHERE` predicates
    fn push_conditions(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &BloodRequestFilter,
        search: Option<&str>,
    ) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = filter.user_id {
            builder.push(" AND br.user_id = ").push_bind(user_id.to_string());
        }
        if let Some(event_type) = filter.event_type {
            builder.push(" AND br.event_type = ").push_bind(event_type.as_str());
        }
        if let Some(status) = filter.status {
            builder.push(" AND br.status = ").push_bind(status.as_str());
        }
        if let Some(urgency) = filter.urgency_level {
            builder.push(" AND br.urgency_level = ").push_bind(urgency.as_str());
        }
        if let Some(blood_type) = &filter.blood_type {
            builder
                .push(" AND UPPER(br.blood_type) = ")
                .push_bind(blood_type.to_uppercase());
        }
        if let Some(min) = filter.min_quantity {
            builder.push(" AND br.quantity >= ").push_bind(min);
        }
        if let Some(max) = filter.max_quantity {
            builder.push(" AND br.quantity <= ").push_bind(max);
        }
        if let Some(start) = filter.start_date {
            builder.push(" AND br.event_date >= ").push_bind(start);
        }
        if let Some(end) = filter.end_date {
            builder.push(" AND br.event_date <= ").push_bind(end);
        }
        if let Some(term) = search {
            let pattern = like_pattern(term);
            builder.push(" AND (");
            let mut separated = builder.separated(" OR ");
            for col in [
                "br.patient_name",
                "br.event_name",
                "br.diagnosis",
                "u.name",
                "h.name",
            ] {
                separated
                    .push(format!("LOWER({}) LIKE ", col))
                    .push_bind_unseparated(pattern.clone());
            }
            builder.push(")");
        }
    }

    /// Predicates selecting verified campaigns dated on or after `today`
    fn push_active_campaign(builder: &mut QueryBuilder<'_, MySql>, today: NaiveDate) {
        builder
            .push(" WHERE br.event_type = ")
            .push_bind(EventType::Campaign.as_str())
            .push(" AND br.status = ")
            .push_bind(RequestStatus::Verified.as_str())
            .push(" AND br.event_date >= ")
            .push_bind(today);
    }

    async fn exists(&self, id: Uuid) -> DomainResult<bool> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM blood_requests WHERE id = ");
        count.push_bind(id.to_string());
        Ok(fetch_total(&mut count, &self.pool).await? > 0)
    }

    async fn count_where(&self, build: impl FnOnce(&mut QueryBuilder<'_, MySql>)) -> DomainResult<u64> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM blood_requests br");
        build(&mut count);
        fetch_total(&mut count, &self.pool).await
    }
}

#[async_trait]
impl BloodRequestRepository for MySqlBloodRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<BloodRequest>> {
        let query = format!("SELECT {} FROM blood_requests br WHERE br.id = ? LIMIT 1", COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn create(&self, request: BloodRequest) -> DomainResult<BloodRequest> {
        sqlx::query(
            r#"
            INSERT INTO blood_requests (
                id, user_id, hospital_id, patient_name, event_name, event_date,
                start_time, end_time, slots_available, slots_booked, blood_type,
                quantity, urgency_level, diagnosis, status, expiry_date,
                event_type, image_url, image_public_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(request.user_id.to_string())
        .bind(request.hospital_id.to_string())
        .bind(&request.patient_name)
        .bind(&request.event_name)
        .bind(request.event_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.slots_available)
        .bind(request.slots_booked)
        .bind(&request.blood_type)
        .bind(request.quantity)
        .bind(request.urgency_level.as_str())
        .bind(&request.diagnosis)
        .bind(request.status.as_str())
        .bind(request.expiry_date)
        .bind(request.event_type.as_str())
        .bind(&request.image_url)
        .bind(&request.image_public_id)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(request)
    }

    async fn update(&self, request: BloodRequest) -> DomainResult<BloodRequest> {
        // Slot counters are owned by book_slot/release_slot and never overwritten here
        let result = sqlx::query(
            r#"
            UPDATE blood_requests SET
                hospital_id = ?, patient_name = ?, event_name = ?, event_date = ?,
                start_time = ?, end_time = ?, slots_available = ?, blood_type = ?,
                quantity = ?, urgency_level = ?, diagnosis = ?, status = ?,
                expiry_date = ?, image_url = ?, image_public_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(request.hospital_id.to_string())
        .bind(&request.patient_name)
        .bind(&request.event_name)
        .bind(request.event_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.slots_available)
        .bind(&request.blood_type)
        .bind(request.quantity)
        .bind(request.urgency_level.as_str())
        .bind(&request.diagnosis)
        .bind(request.status.as_str())
        .bind(request.expiry_date)
        .bind(&request.image_url)
        .bind(&request.image_public_id)
        .bind(request.updated_at)
        .bind(request.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 && !self.exists(request.id).await? {
            return Err(DomainError::not_found("permintaan darah"));
        }
        Ok(request)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM blood_requests WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &BloodRequestFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<BloodRequest>> {
        let search = query.search_term();

        let mut count = QueryBuilder::new(format!("SELECT COUNT(*) AS total {}", FROM));
        Self::push_conditions(&mut count, filter, search.as_deref());
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} {}", COLUMNS, FROM));
        Self::push_conditions(&mut select, filter, search.as_deref());
        push_page(&mut select, query, SORTABLE, "br");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_request)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }

    async fn book_slot(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blood_requests
            SET slots_booked = slots_booked + 1, updated_at = ?
            WHERE id = ? AND slots_booked < slots_available
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        if !self.exists(id).await? {
            return Err(DomainError::not_found("permintaan darah"));
        }
        tracing::debug!(request_id = %id, "campaign slots exhausted");
        Ok(false)
    }

    async fn release_slot(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blood_requests
            SET slots_booked = slots_booked - 1, updated_at = ?
            WHERE id = ? AND slots_booked > 0
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, today: NaiveDate) -> DomainResult<RequestStats> {
        let by_type = |event_type: EventType| {
            move |b: &mut QueryBuilder<'_, MySql>| {
                b.push(" WHERE br.event_type = ").push_bind(event_type.as_str());
            }
        };
        let by_status = |status: RequestStatus| {
            move |b: &mut QueryBuilder<'_, MySql>| {
                b.push(" WHERE br.status = ").push_bind(status.as_str());
            }
        };

        Ok(RequestStats {
            total_requests: self.count_where(by_type(EventType::BloodRequest)).await?,
            total_campaigns: self.count_where(by_type(EventType::Campaign)).await?,
            verified: self.count_where(by_status(RequestStatus::Verified)).await?,
            pending: self.count_where(by_status(RequestStatus::Pending)).await?,
            active_campaigns: self
                .count_where(|b| Self::push_active_campaign(b, today))
                .await?,
        })
    }

    async fn latest_active_campaigns(
        &self,
        today: NaiveDate,
        limit: u32,
    ) -> DomainResult<Vec<BloodRequest>> {
        let mut select = QueryBuilder::new(format!("SELECT {} FROM blood_requests br", COLUMNS));
        Self::push_active_campaign(&mut select, today);
        select
            .push(" ORDER BY br.created_at DESC LIMIT ")
            .push_bind(i64::from(limit));

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        rows.iter().map(Self::row_to_request).collect()
    }
}
