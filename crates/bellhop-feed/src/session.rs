//! Staff session resolution from the local store.

use tracing::warn;

use bellhop_core::traits::LocalStore;
use bellhop_entity::{StaffSession, StaffUser};

/// Local store key holding the staff bearer token.
pub const STAFF_TOKEN_KEY: &str = "staffUserToken";
/// Local store key holding the staff user record as JSON.
pub const STAFF_USER_KEY: &str = "staffUserData";

/// Resolves the active staff session, if any.
///
/// An absent or empty token, an absent user record, or a user record that
/// fails to parse all mean "signed out" rather than an error; the feed
/// treats that as a valid terminal state.
pub async fn resolve(store: &dyn LocalStore) -> Option<StaffSession> {
    let token = match store.get(STAFF_TOKEN_KEY).await {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return None,
        Err(e) => {
            warn!(error = %e, "Staff token read failed");
            return None;
        }
    };

    let raw = match store.get(STAFF_USER_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Staff user record read failed");
            return None;
        }
    };

    match serde_json::from_str::<StaffUser>(&raw) {
        Ok(staff) => Some(StaffSession { token, staff }),
        Err(e) => {
            warn!(error = %e, "Malformed staff user record");
            None
        }
    }
}
