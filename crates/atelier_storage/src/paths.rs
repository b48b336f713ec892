//! Unique destination path resolution.

use crate::{ObjectStore, Probe};
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use tracing::{debug, instrument};

/// Upper bound on candidate paths probed before giving up.
pub const MAX_RESOLVE_ATTEMPTS: u32 = 1000;

/// Find a destination path that does not collide with an existing object.
///
/// Starts with `{base}.{ext}` and, while the store reports the candidate as
/// occupied, retries with `{base}_1.{ext}`, `{base}_2.{ext}`, and so on.
/// Collisions are always resolved by suffixing, never by overwriting.
///
/// A `Missing` probe ends the loop; a transport error propagates as-is (no
/// retry policy here, the caller fails the item). After
/// [`MAX_RESOLVE_ATTEMPTS`] occupied candidates the resolution fails with
/// `ResolutionExhausted` rather than looping against a pathological store.
#[instrument(skip(store))]
pub async fn resolve_unique_path(
    store: &dyn ObjectStore,
    base: &str,
    ext: &str,
) -> AtelierResult<String> {
    let mut candidate = format!("{base}.{ext}");
    let mut counter: u32 = 0;
    while counter < MAX_RESOLVE_ATTEMPTS {
        match store.probe(&candidate).await? {
            Probe::Missing => {
                debug!(path = %candidate, probes = counter + 1, "Resolved unique path");
                return Ok(candidate);
            }
            Probe::Found(_) => {
                counter += 1;
                candidate = format!("{base}_{counter}.{ext}");
            }
        }
    }
    Err(StorageError::new(StorageErrorKind::ResolutionExhausted {
        attempts: MAX_RESOLVE_ATTEMPTS,
        base: base.to_string(),
    })
    .into())
}
