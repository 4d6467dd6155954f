//! Session command and query handlers.

mod archive_session;
mod create_session;
mod delete_session;
mod get_session;
mod get_statistics;
mod list_sessions;
mod update_economics;
mod update_session_details;

pub use archive_session::{ArchiveSessionCommand, ArchiveSessionHandler, ArchiveSessionResult};
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler, DeleteSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery, GetSessionResult};
pub use get_statistics::{GetSessionStatisticsHandler, GetSessionStatisticsQuery};
pub use list_sessions::ListSessionsHandler;
pub use update_economics::{
    UpdateEconomicsCommand, UpdateEconomicsHandler, UpdateEconomicsResult,
};
pub use update_session_details::{
    UpdateSessionDetailsCommand, UpdateSessionDetailsHandler, UpdateSessionDetailsResult,
};
