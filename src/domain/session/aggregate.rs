//! Session aggregate entity.
//!
//! A session (the "entretien") is one diagnostic interview engagement with
//! a company. It carries the economic inputs from which the hourly rate
//! (PRISM) is derived; every dysfunction recorded under the session prices
//! its impact off that rate.
//!
//! # Derived state
//!
//! `hourly_rate` is owned by this aggregate and recomputed on every
//! economics mutation. Dependent dysfunction costs are refreshed by the
//! `UpdateEconomicsHandler` fan-out, not here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, SessionId, SessionStatus, Timestamp, UserId,
};

use super::economics::{EconomicInputs, RateDerivation};

/// Maximum length for session title and company name.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Outcome of an economics update, reported so callers can decide whether
/// the dysfunction-cost fan-out is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateChange {
    pub previous: Option<Money>,
    pub current: Option<Money>,
}

impl RateChange {
    /// Whether the derived rate actually changed.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Session aggregate - one diagnostic interview engagement.
///
/// # Invariants
///
/// - `title` and `company` are non-empty, at most 500 characters
/// - `hourly_rate` always equals `RateDerivation::derive(&economics)`
/// - Archived sessions cannot be modified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Consultant who owns this session.
    user_id: UserId,

    /// Engagement title.
    title: String,

    /// Company being diagnosed.
    company: String,

    /// Optional activity sector.
    sector: Option<String>,

    /// When the interview takes place.
    interview_date: Timestamp,

    /// Current lifecycle status.
    status: SessionStatus,

    /// Pre-interview economic inputs.
    economics: EconomicInputs,

    /// Derived hourly rate (PRISM); None while inputs are incomplete.
    hourly_rate: Option<Money>,

    /// Free-form notes.
    notes: Option<String>,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl Session {
    /// Create a new session in preparation state.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or company is empty or too long
    pub fn new(
        id: SessionId,
        user_id: UserId,
        title: String,
        company: String,
    ) -> Result<Self, DomainError> {
        Self::validate_name("title", &title)?;
        Self::validate_name("company", &company)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            title,
            company,
            sector: None,
            interview_date: now,
            status: SessionStatus::Preparation,
            economics: EconomicInputs::default(),
            hourly_rate: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        user_id: UserId,
        title: String,
        company: String,
        sector: Option<String>,
        interview_date: Timestamp,
        status: SessionStatus,
        economics: EconomicInputs,
        hourly_rate: Option<Money>,
        notes: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            company,
            sector,
            interview_date,
            status,
            economics,
            hourly_rate,
            notes,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    pub fn interview_date(&self) -> &Timestamp {
        &self.interview_date
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn economics(&self) -> &EconomicInputs {
        &self.economics
    }

    /// The derived PRISM rate; None while economic inputs are incomplete.
    pub fn hourly_rate(&self) -> Option<Money> {
        self.hourly_rate
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given consultant owns this session.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Validates that the consultant can access this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the consultant is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Consultant is not authorized to access this session",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the session.
    pub fn rename(&mut self, new_title: String) -> Result<String, DomainError> {
        self.ensure_mutable()?;
        Self::validate_name("title", &new_title)?;

        let old_title = std::mem::replace(&mut self.title, new_title);
        self.touch();
        Ok(old_title)
    }

    /// Update descriptive fields (sector, notes, interview date).
    ///
    /// The outer `Option` on `sector` and `notes` distinguishes "leave
    /// unchanged" from an explicit assignment; `Some(None)` clears.
    pub fn update_details(
        &mut self,
        sector: Option<Option<String>>,
        notes: Option<Option<String>>,
        interview_date: Option<Timestamp>,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        if let Some(sector) = sector {
            self.sector = sector;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        if let Some(date) = interview_date {
            self.interview_date = date;
        }
        self.touch();
        Ok(())
    }

    /// Replace the economic inputs and re-derive the hourly rate.
    ///
    /// Returns the rate change so the caller can run the dysfunction-cost
    /// fan-out when the rate moved.
    ///
    /// # Errors
    ///
    /// - `SessionArchived` if the session is archived
    /// - `ValidationFailed` for out-of-range inputs
    pub fn update_economics(&mut self, inputs: EconomicInputs) -> Result<RateChange, DomainError> {
        self.ensure_mutable()?;
        inputs.validate()?;

        let previous = self.hourly_rate;
        self.economics = inputs;
        self.hourly_rate = RateDerivation::derive(&self.economics);
        self.touch();

        Ok(RateChange {
            previous,
            current: self.hourly_rate,
        })
    }

    /// Move the session to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the transition is not allowed
    pub fn transition_to(&mut self, target: SessionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {} to {}", self.status, target),
            ));
        }
        self.status = target;
        self.touch();
        Ok(())
    }

    /// Archive the session (soft delete).
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if self.status == SessionStatus::Archived {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Session is already archived",
            ));
        }
        self.transition_to(SessionStatus::Archived)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionArchived,
                "Cannot modify an archived session",
            ))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_name(field: &str, value: &str) -> Result<(), DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(field, format!("{} cannot be empty", field)));
        }
        if trimmed.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                field,
                format!("{} must be {} characters or less", field, MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }
}
