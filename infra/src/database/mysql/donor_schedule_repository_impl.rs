//! MySQL implementation of the DonorScheduleRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use dc_core::domain::entities::donor_schedule::{DonorSchedule, ScheduleStatus};
use dc_core::domain::value_objects::DonorScheduleFilter;
use dc_core::errors::{DomainError, DomainResult};
use dc_core::repositories::DonorScheduleRepository;
use dc_shared::{PageQuery, Paginated};

use super::common::{
    column, enum_column, fetch_total, like_pattern, push_page, query_error, uuid_column,
};

const COLUMNS: &str = r#"
    ds.id, ds.hospital_id, ds.event_name, ds.event_date, ds.start_time,
    ds.end_time, ds.slots_available, ds.slots_booked, ds.description,
    ds.status, ds.created_at, ds.updated_at
"#;

const FROM: &str = "FROM donor_schedules ds LEFT JOIN hospitals h ON h.id = ds.hospital_id";

const SORTABLE: &[&str] = &["created_at", "updated_at", "event_date", "event_name", "status"];

pub struct MySqlDonorScheduleRepository {
    pool: MySqlPool,
}

impl MySqlDonorScheduleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_schedule(row: &MySqlRow) -> Result<DonorSchedule, DomainError> {
        Ok(DonorSchedule {
            id: uuid_column(row, "id")?,
            hospital_id: uuid_column(row, "hospital_id")?,
            event_name: column(row, "event_name")?,
            event_date: column(row, "event_date")?,
            start_time: column(row, "start_time")?,
            end_time: column(row, "end_time")?,
            slots_available: column(row, "slots_available")?,
            slots_booked: column(row, "slots_booked")?,
            description: column(row, "description")?,
            status: enum_column(row, "status")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn push_conditions(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &DonorScheduleFilter,
        search: Option<&str>,
    ) {
        builder.push(" WHERE 1 = 1");
        if let Some(hospital_id) = filter.hospital_id {
            builder
                .push(" AND ds.hospital_id = ")
                .push_bind(hospital_id.to_string());
        }
        if let Some(status) = filter.status {
            builder.push(" AND ds.status = ").push_bind(status.as_str());
        }
        if let Some(start) = filter.start_date {
            builder.push(" AND ds.event_date >= ").push_bind(start);
        }
        if let Some(end) = filter.end_date {
            builder.push(" AND ds.event_date <= ").push_bind(end);
        }
        match filter.slots_available {
            Some(true) => {
                builder.push(" AND ds.slots_booked < ds.slots_available");
            }
            Some(false) => {
                builder.push(" AND ds.slots_booked >= ds.slots_available");
            }
            None => {}
        }
        if let Some(term) = search {
            let pattern = like_pattern(term);
            builder
                .push(" AND (LOWER(ds.event_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(h.name) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    async fn exists(&self, id: Uuid) -> DomainResult<bool> {
        let mut count =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM donor_schedules WHERE id = ");
        count.push_bind(id.to_string());
        Ok(fetch_total(&mut count, &self.pool).await? > 0)
    }
}

#[async_trait]
impl DonorScheduleRepository for MySqlDonorScheduleRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<DonorSchedule>> {
        let query = format!(
            "SELECT {} FROM donor_schedules ds WHERE ds.id = ? LIMIT 1",
            COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        row.as_ref().map(Self::row_to_schedule).transpose()
    }

    async fn create(&self, schedule: DonorSchedule) -> DomainResult<DonorSchedule> {
        sqlx::query(
            r#"
            INSERT INTO donor_schedules (
                id, hospital_id, event_name, event_date, start_time, end_time,
                slots_available, slots_booked, description, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(schedule.id.to_string())
        .bind(schedule.hospital_id.to_string())
        .bind(&schedule.event_name)
        .bind(schedule.event_date)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(schedule.slots_available)
        .bind(schedule.slots_booked)
        .bind(&schedule.description)
        .bind(schedule.status.as_str())
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(schedule)
    }

    async fn update(&self, schedule: DonorSchedule) -> DomainResult<DonorSchedule> {
        let result = sqlx::query(
            r#"
            UPDATE donor_schedules SET
                hospital_id = ?, event_name = ?, event_date = ?, start_time = ?,
                end_time = ?, slots_available = ?, description = ?, status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(schedule.hospital_id.to_string())
        .bind(&schedule.event_name)
        .bind(schedule.event_date)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(schedule.slots_available)
        .bind(&schedule.description)
        .bind(schedule.status.as_str())
        .bind(schedule.updated_at)
        .bind(schedule.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 && !self.exists(schedule.id).await? {
            return Err(DomainError::not_found("jadwal donor"));
        }
        Ok(schedule)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM donor_schedules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &DonorScheduleFilter,
        query: &PageQuery,
    ) -> DomainResult<Paginated<DonorSchedule>> {
        let search = query.search_term();

        let mut count = QueryBuilder::new(format!("SELECT COUNT(*) AS total {}", FROM));
        Self::push_conditions(&mut count, filter, search.as_deref());
        let total = fetch_total(&mut count, &self.pool).await?;

        let mut select = QueryBuilder::new(format!("SELECT {} {}", COLUMNS, FROM));
        Self::push_conditions(&mut select, filter, search.as_deref());
        push_page(&mut select, query, SORTABLE, "ds");

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(Self::row_to_schedule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(items, total))
    }

    async fn book_slot(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE donor_schedules
            SET slots_booked = slots_booked + 1, updated_at = ?
            WHERE id = ? AND status = ? AND slots_booked < slots_available
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .bind(ScheduleStatus::Upcoming.as_str())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        if !self.exists(id).await? {
            return Err(DomainError::not_found("jadwal donor"));
        }
        Ok(false)
    }

    async fn release_slot(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE donor_schedules
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
}
