//! PostgreSQL implementation of TaxonomyReader.
//!
//! List-shaped fields (sub-themes, examples, guiding questions, default
//! flags) are stored as JSONB, matching the curated seed data.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    AnalysisDomain, CostComponent, DomainError, ErrorCode, Indicator, TaxonomyItemId,
};
use crate::domain::taxonomy::TaxonomyItem;
use crate::ports::TaxonomyReader;

use super::{db_error, decode_error};

/// PostgreSQL implementation of TaxonomyReader.
#[derive(Clone)]
pub struct PostgresTaxonomyReader {
    pool: PgPool,
}

impl PostgresTaxonomyReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxonomyReader for PostgresTaxonomyReader {
    async fn find_by_id(&self, id: &TaxonomyItemId) -> Result<Option<TaxonomyItem>, DomainError> {
        let row = sqlx::query("SELECT * FROM taxonomy_items WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch taxonomy item", e))?;

        row.map(row_to_item).transpose()
    }

    async fn find_by_ids(
        &self,
        ids: &[TaxonomyItemId],
    ) -> Result<Vec<TaxonomyItem>, DomainError> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query("SELECT * FROM taxonomy_items WHERE id = ANY($1)")
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetch taxonomy items", e))?;

        let mut items: Vec<TaxonomyItem> = rows
            .into_iter()
            .map(row_to_item)
            .collect::<Result<_, _>>()?;
        // Preserve request order
        items.sort_by_key(|item| ids.iter().position(|id| *id == item.id));
        Ok(items)
    }

    async fn list_active(
        &self,
        domain: Option<AnalysisDomain>,
    ) -> Result<Vec<TaxonomyItem>, DomainError> {
        let rows = match domain {
            Some(domain) => {
                sqlx::query(
                    r#"
                    SELECT * FROM taxonomy_items
                    WHERE active AND domain = $1
                    ORDER BY display_order NULLS LAST, code
                    "#,
                )
                .bind(domain.index() as i16)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT * FROM taxonomy_items
                    WHERE active
                    ORDER BY domain, display_order NULLS LAST, code
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list taxonomy items", e))?;

        rows.into_iter().map(row_to_item).collect()
    }
}

fn row_to_item(row: PgRow) -> Result<TaxonomyItem, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| decode_error("id", e))?;
    let code: String = row.try_get("code").map_err(|e| decode_error("code", e))?;
    let domain: i16 = row
        .try_get("domain")
        .map_err(|e| decode_error("domain", e))?;
    let title: String = row.try_get("title").map_err(|e| decode_error("title", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| decode_error("description", e))?;
    let sub_themes: serde_json::Value = row
        .try_get("sub_themes")
        .map_err(|e| decode_error("sub_themes", e))?;
    let examples: serde_json::Value = row
        .try_get("examples")
        .map_err(|e| decode_error("examples", e))?;
    let guiding_questions: serde_json::Value = row
        .try_get("guiding_questions")
        .map_err(|e| decode_error("guiding_questions", e))?;
    let default_indicators: serde_json::Value = row
        .try_get("default_indicators")
        .map_err(|e| decode_error("default_indicators", e))?;
    let default_components: serde_json::Value = row
        .try_get("default_components")
        .map_err(|e| decode_error("default_components", e))?;
    let active: bool = row
        .try_get("active")
        .map_err(|e| decode_error("active", e))?;
    let display_order: Option<i32> = row
        .try_get("display_order")
        .map_err(|e| decode_error("display_order", e))?;

    let domain = AnalysisDomain::from_index(domain as u8)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;

    Ok(TaxonomyItem {
        id: TaxonomyItemId::from_uuid(id),
        code,
        domain,
        title,
        description,
        sub_themes: json_list(sub_themes, "sub_themes")?,
        examples: json_list(examples, "examples")?,
        guiding_questions: json_list(guiding_questions, "guiding_questions")?,
        default_indicators: json_list::<Indicator>(default_indicators, "default_indicators")?,
        default_components: json_list::<CostComponent>(default_components, "default_components")?,
        active,
        display_order: display_order.map(|o| o as u32),
    })
}

fn json_list<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    column: &str,
) -> Result<Vec<T>, DomainError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid JSON in column '{}': {}", column, e),
        )
    })
}
