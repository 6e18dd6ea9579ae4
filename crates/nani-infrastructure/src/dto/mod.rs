//! Data Transfer Objects (DTOs) for persistence.
//!
//! Domain types that serialize as-is (roles, preferences, the context record)
//! are written directly. DTOs exist where the on-disk shape differs from the
//! domain model, or where the index only needs part of a file.

mod role;
mod session;

pub use role::RoleSummaryDTO;
pub use session::{SessionDTO, SessionSummaryDTO, SummaryMetadataDTO};
