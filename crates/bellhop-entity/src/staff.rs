//! Staff identity as stored client-side.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The staff user record persisted in the local store under `staffUserData`.
///
/// Only `id` is required; the dashboard stores the full profile but this
/// component reads nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    /// Staff member identifier.
    pub id: Uuid,
    /// Display name, if stored.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address, if stored.
    #[serde(default)]
    pub email: Option<String>,
}

/// A resolved authenticated staff session: bearer token plus identity.
#[derive(Debug, Clone)]
pub struct StaffSession {
    /// Bearer token for the admin API and live channel.
    pub token: String,
    /// The signed-in staff user.
    pub staff: StaffUser,
}

impl StaffSession {
    /// Staff member identifier.
    pub fn staff_id(&self) -> Uuid {
        self.staff.id
    }
}
