//! PostgreSQL implementation of DysfunctionRepository.
//!
//! Classification flags are stored as one boolean column per indicator
//! and cost component, mirroring the 5x4 analysis grid.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::dysfunction::{ComputedCost, Dysfunction};
use crate::domain::foundation::{
    AnalysisDomain, Classification, DomainError, DysfunctionId, EntryMode, ErrorCode, Frequency,
    Money, Priority, SessionId, TaxonomyItemId, Timestamp,
};
use crate::ports::DysfunctionRepository;

use super::{db_error, decode_error};

/// PostgreSQL implementation of DysfunctionRepository.
#[derive(Clone)]
pub struct PostgresDysfunctionRepository {
    pool: PgPool,
}

impl PostgresDysfunctionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        dysfunction: &Dysfunction,
    ) -> Result<(), DomainError> {
        bind_all(sqlx::query(INSERT_SQL), dysfunction)
            .execute(&mut **tx)
            .await
            .map_err(|e| db_error("insert dysfunction", e))?;
        Ok(())
    }

    async fn update_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        dysfunction: &Dysfunction,
    ) -> Result<(), DomainError> {
        bind_all(sqlx::query(UPDATE_SQL), dysfunction)
            .execute(&mut **tx)
            .await
            .map_err(|e| db_error("update dysfunction", e))?;
        Ok(())
    }
}

const INSERT_SQL: &str = r#"
    INSERT INTO dysfunctions (
        id, session_id, taxonomy_item_id, description, frequency,
        minutes_per_occurrence, people_affected, direct_cost,
        absenteeism, workplace_accidents, staff_turnover, quality_defects,
        productivity_gaps, excess_time, excess_consumption, overproduction,
        non_production, domain, entry_mode, priority, validated, comments,
        unit_cost, annual_cost, created_at, updated_at
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
        $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26
    )
"#;

const UPDATE_SQL: &str = r#"
    UPDATE dysfunctions SET
        session_id = $2,
        taxonomy_item_id = $3,
        description = $4,
        frequency = $5,
        minutes_per_occurrence = $6,
        people_affected = $7,
        direct_cost = $8,
        absenteeism = $9,
        workplace_accidents = $10,
        staff_turnover = $11,
        quality_defects = $12,
        productivity_gaps = $13,
        excess_time = $14,
        excess_consumption = $15,
        overproduction = $16,
        non_production = $17,
        domain = $18,
        entry_mode = $19,
        priority = $20,
        validated = $21,
        comments = $22,
        unit_cost = $23,
        annual_cost = $24,
        created_at = $25,
        updated_at = $26
    WHERE id = $1
"#;

#[async_trait]
impl DysfunctionRepository for PostgresDysfunctionRepository {
    async fn save(&self, dysfunction: &Dysfunction) -> Result<(), DomainError> {
        bind_all(sqlx::query(INSERT_SQL), dysfunction)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("insert dysfunction", e))?;
        Ok(())
    }

    async fn save_all(&self, dysfunctions: &[Dysfunction]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;
        for dysfunction in dysfunctions {
            Self::insert_in_tx(&mut tx, dysfunction).await?;
        }
        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;
        Ok(())
    }

    async fn update(&self, dysfunction: &Dysfunction) -> Result<(), DomainError> {
        let result = bind_all(sqlx::query(UPDATE_SQL), dysfunction)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("update dysfunction", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DysfunctionNotFound,
                format!("Dysfunction not found: {}", dysfunction.id()),
            ));
        }
        Ok(())
    }

    async fn update_all(&self, dysfunctions: &[Dysfunction]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;
        for dysfunction in dysfunctions {
            Self::update_in_tx(&mut tx, dysfunction).await?;
        }
        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &DysfunctionId) -> Result<Option<Dysfunction>, DomainError> {
        let row = sqlx::query("SELECT * FROM dysfunctions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch dysfunction", e))?;

        row.map(row_to_dysfunction).transpose()
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Dysfunction>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM dysfunctions WHERE session_id = $1 ORDER BY created_at ASC",
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch dysfunctions by session", e))?;

        rows.into_iter().map(row_to_dysfunction).collect()
    }

    async fn delete(&self, id: &DysfunctionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM dysfunctions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete dysfunction", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DysfunctionNotFound,
                format!("Dysfunction not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn delete_by_session(&self, session_id: &SessionId) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM dysfunctions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete dysfunctions by session", e))?;

        Ok(result.rows_affected() as usize)
    }
}

type PgQuery<'q> =
    sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>;

fn bind_all<'q>(query: PgQuery<'q>, d: &'q Dysfunction) -> PgQuery<'q> {
    let classification = d.classification();
    query
        .bind(d.id().as_uuid())
        .bind(d.session_id().as_uuid())
        .bind(d.taxonomy_item_id().map(|id| *id.as_uuid()))
        .bind(d.description())
        .bind(d.frequency().as_str())
        .bind(d.minutes_per_occurrence() as i32)
        .bind(d.people_affected() as i32)
        .bind(d.direct_cost().amount())
        .bind(classification.absenteeism)
        .bind(classification.workplace_accidents)
        .bind(classification.staff_turnover)
        .bind(classification.quality_defects)
        .bind(classification.productivity_gaps)
        .bind(classification.excess_time)
        .bind(classification.excess_consumption)
        .bind(classification.overproduction)
        .bind(classification.non_production)
        .bind(d.domain().map(|domain| domain.index() as i16))
        .bind(entry_mode_to_str(d.entry_mode()))
        .bind(priority_to_str(d.priority()))
        .bind(d.is_validated())
        .bind(d.comments())
        .bind(d.cost().map(|c| c.unit_cost.amount()))
        .bind(d.cost().map(|c| c.annual_cost.amount()))
        .bind(d.created_at().as_datetime())
        .bind(d.updated_at().as_datetime())
}

fn entry_mode_to_str(mode: EntryMode) -> &'static str {
    match mode {
        EntryMode::Free => "free",
        EntryMode::Guided => "guided",
        EntryMode::Catalog => "catalog",
    }
}

fn str_to_entry_mode(s: &str) -> Result<EntryMode, DomainError> {
    match s {
        "free" => Ok(EntryMode::Free),
        "guided" => Ok(EntryMode::Guided),
        "catalog" => Ok(EntryMode::Catalog),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid entry mode: {}", s),
        )),
    }
}

fn priority_to_str(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
        Priority::Critical => "critical",
    }
}

fn str_to_priority(s: &str) -> Result<Priority, DomainError> {
    match s {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        "critical" => Ok(Priority::Critical),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid priority: {}", s),
        )),
    }
}

fn row_to_dysfunction(row: PgRow) -> Result<Dysfunction, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| decode_error("id", e))?;
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| decode_error("session_id", e))?;
    let taxonomy_item_id: Option<uuid::Uuid> = row
        .try_get("taxonomy_item_id")
        .map_err(|e| decode_error("taxonomy_item_id", e))?;
    let description: String = row
        .try_get("description")
        .map_err(|e| decode_error("description", e))?;
    let frequency: String = row
        .try_get("frequency")
        .map_err(|e| decode_error("frequency", e))?;
    let minutes_per_occurrence: i32 = row
        .try_get("minutes_per_occurrence")
        .map_err(|e| decode_error("minutes_per_occurrence", e))?;
    let people_affected: i32 = row
        .try_get("people_affected")
        .map_err(|e| decode_error("people_affected", e))?;
    let direct_cost: Decimal = row
        .try_get("direct_cost")
        .map_err(|e| decode_error("direct_cost", e))?;
    let domain: Option<i16> = row
        .try_get("domain")
        .map_err(|e| decode_error("domain", e))?;
    let entry_mode: String = row
        .try_get("entry_mode")
        .map_err(|e| decode_error("entry_mode", e))?;
    let priority: String = row
        .try_get("priority")
        .map_err(|e| decode_error("priority", e))?;
    let validated: bool = row
        .try_get("validated")
        .map_err(|e| decode_error("validated", e))?;
    let comments: Option<String> = row
        .try_get("comments")
        .map_err(|e| decode_error("comments", e))?;
    let unit_cost: Option<Decimal> = row
        .try_get("unit_cost")
        .map_err(|e| decode_error("unit_cost", e))?;
    let annual_cost: Option<Decimal> = row
        .try_get("annual_cost")
        .map_err(|e| decode_error("annual_cost", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| decode_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| decode_error("updated_at", e))?;

    let classification = Classification {
        absenteeism: flag(&row, "absenteeism")?,
        workplace_accidents: flag(&row, "workplace_accidents")?,
        staff_turnover: flag(&row, "staff_turnover")?,
        quality_defects: flag(&row, "quality_defects")?,
        productivity_gaps: flag(&row, "productivity_gaps")?,
        excess_time: flag(&row, "excess_time")?,
        excess_consumption: flag(&row, "excess_consumption")?,
        overproduction: flag(&row, "overproduction")?,
        non_production: flag(&row, "non_production")?,
    };

    let frequency: Frequency = frequency
        .parse()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;
    let domain = domain
        .map(|index| AnalysisDomain::from_index(index as u8))
        .transpose()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;
    // Stored cost columns are always written as a pair
    let cost = match (unit_cost, annual_cost) {
        (Some(unit), Some(annual)) => Some(ComputedCost {
            unit_cost: Money::new(unit),
            annual_cost: Money::new(annual),
        }),
        _ => None,
    };

    Ok(Dysfunction::reconstitute(
        DysfunctionId::from_uuid(id),
        SessionId::from_uuid(session_id),
        taxonomy_item_id.map(TaxonomyItemId::from_uuid),
        description,
        frequency,
        minutes_per_occurrence as u32,
        people_affected as u32,
        Money::new(direct_cost),
        classification,
        domain,
        str_to_entry_mode(&entry_mode)?,
        str_to_priority(&priority)?,
        validated,
        comments,
        cost,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn flag(row: &PgRow, column: &str) -> Result<bool, DomainError> {
    row.try_get(column).map_err(|e| decode_error(column, e))
}
