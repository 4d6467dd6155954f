//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, SessionId, SessionStatus, Timestamp, UserId,
};
use crate::domain::session::{EconomicInputs, Session};
use crate::ports::SessionRepository;

use super::{db_error, decode_error};

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, user_id, title, company, sector, interview_date, status,
                scope_revenue, gross_margin_percent, hours_worked_per_year,
                headcount, hourly_rate, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(session.title())
        .bind(session.company())
        .bind(session.sector())
        .bind(session.interview_date().as_datetime())
        .bind(session_status_to_str(session.status()))
        .bind(session.economics().scope_revenue.map(|m| m.amount()))
        .bind(session.economics().gross_margin_percent)
        .bind(session.economics().hours_worked_per_year.map(|h| h as i32))
        .bind(session.economics().headcount.map(|h| h as i32))
        .bind(session.hourly_rate().map(|m| m.amount()))
        .bind(session.notes())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert session", e))?;

        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                title = $2,
                company = $3,
                sector = $4,
                interview_date = $5,
                status = $6,
                scope_revenue = $7,
                gross_margin_percent = $8,
                hours_worked_per_year = $9,
                headcount = $10,
                hourly_rate = $11,
                notes = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.title())
        .bind(session.company())
        .bind(session.sector())
        .bind(session.interview_date().as_datetime())
        .bind(session_status_to_str(session.status()))
        .bind(session.economics().scope_revenue.map(|m| m.amount()))
        .bind(session.economics().gross_margin_percent)
        .bind(session.economics().hours_worked_per_year.map(|h| h as i32))
        .bind(session.economics().headcount.map(|h| h as i32))
        .bind(session.hourly_rate().map(|m| m.amount()))
        .bind(session.notes())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch sessions by user", e))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Preparation => "preparation",
        SessionStatus::InProgress => "in_progress",
        SessionStatus::Completed => "completed",
        SessionStatus::Archived => "archived",
    }
}

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "preparation" => Ok(SessionStatus::Preparation),
        "in_progress" => Ok(SessionStatus::InProgress),
        "completed" => Ok(SessionStatus::Completed),
        "archived" => Ok(SessionStatus::Archived),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| decode_error("id", e))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| decode_error("user_id", e))?;
    let title: String = row.try_get("title").map_err(|e| decode_error("title", e))?;
    let company: String = row
        .try_get("company")
        .map_err(|e| decode_error("company", e))?;
    let sector: Option<String> = row
        .try_get("sector")
        .map_err(|e| decode_error("sector", e))?;
    let interview_date: chrono::DateTime<chrono::Utc> = row
        .try_get("interview_date")
        .map_err(|e| decode_error("interview_date", e))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| decode_error("status", e))?;
    let scope_revenue: Option<Decimal> = row
        .try_get("scope_revenue")
        .map_err(|e| decode_error("scope_revenue", e))?;
    let gross_margin_percent: Option<Decimal> = row
        .try_get("gross_margin_percent")
        .map_err(|e| decode_error("gross_margin_percent", e))?;
    let hours_worked_per_year: Option<i32> = row
        .try_get("hours_worked_per_year")
        .map_err(|e| decode_error("hours_worked_per_year", e))?;
    let headcount: Option<i32> = row
        .try_get("headcount")
        .map_err(|e| decode_error("headcount", e))?;
    let hourly_rate: Option<Decimal> = row
        .try_get("hourly_rate")
        .map_err(|e| decode_error("hourly_rate", e))?;
    let notes: Option<String> = row.try_get("notes").map_err(|e| decode_error("notes", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| decode_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| decode_error("updated_at", e))?;

    let user_id = UserId::new(user_id).map_err(DomainError::from)?;
    let economics = EconomicInputs {
        scope_revenue: scope_revenue.map(Money::new),
        gross_margin_percent,
        hours_worked_per_year: hours_worked_per_year.map(|h| h as u32),
        headcount: headcount.map(|h| h as u32),
    };

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        user_id,
        title,
        company,
        sector,
        Timestamp::from_datetime(interview_date),
        str_to_session_status(&status)?,
        economics,
        hourly_rate.map(Money::new),
        notes,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
