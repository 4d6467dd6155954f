//! Dysfunction command handlers.

mod bulk_create_from_catalog;
mod classify_dysfunction;
mod delete_dysfunction;
mod record_dysfunction;
mod update_dysfunction;

pub use bulk_create_from_catalog::{
    BulkCreateFromCatalogCommand, BulkCreateFromCatalogHandler, BulkCreateFromCatalogResult,
};
pub use classify_dysfunction::{
    ClassifyDysfunctionCommand, ClassifyDysfunctionHandler, ClassifyDysfunctionResult,
};
pub use delete_dysfunction::{DeleteDysfunctionCommand, DeleteDysfunctionHandler};
pub use record_dysfunction::{
    RecordDysfunctionCommand, RecordDysfunctionHandler, RecordDysfunctionResult,
};
pub use update_dysfunction::{
    UpdateDysfunctionCommand, UpdateDysfunctionHandler, UpdateDysfunctionResult,
};
