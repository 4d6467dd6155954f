//! Hidden Costs - ISEOR Diagnostic Survey Backend
//!
//! This crate implements the ISEOR "hidden costs" methodology: consultants
//! record interview sessions, log dysfunctions against a fixed six-domain
//! taxonomy, and the system derives unit and annual costs from a per-session
//! hourly rate (PRISM) and rolls them up into aggregate statistics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
