//! The account record read from the directory service.

use uuid::Uuid;

/// Minimal view of a directory account, as consumed by authentication.
///
/// The directory service owns and mutates the full record; this crate only
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable, immutable identifier.
    pub id: Uuid,
    /// Canonical username, unique within the directory.
    pub username: String,
    /// Email address, unique if present.
    pub email: Option<String>,
    /// Whether the account may authenticate at all.
    pub active: bool,
}
