//! Historical fallback resolution for achievement predicates.
//!
//! Current-state counting loses an achievement once the content that earned
//! it is deleted. The profile's historical flag is the durable witness, so
//! a negative current count falls back to reading it.

use crate::core::HistoricalFlag;
use crate::error::Result;
use crate::storage::ProfileStore;

/// Resolve a "has ever" predicate.
///
/// `current` is the fallible current-activity count. A positive count
/// returns `true` without touching the profile store. Otherwise the result
/// is the profile's `flag`, or `false` when no profile exists.
///
/// Any read error, including one in `current`, is returned to the caller so
/// it can fail closed.
pub async fn resolve(
    current: Result<u64>,
    profiles: &dyn ProfileStore,
    user_id: &str,
    flag: HistoricalFlag,
) -> Result<bool> {
    if current? > 0 {
        return Ok(true);
    }

    tracing::debug!(user_id, flag = flag.field_name(), "no current activity, reading profile");
    let profile = profiles.fetch_profile(user_id).await?;
    Ok(profile.is_some_and(|p| p.has(flag)))
}
