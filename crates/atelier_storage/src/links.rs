//! Shared-link resolution.

use crate::ObjectStore;
use atelier_error::AtelierResult;
use tracing::{debug, instrument};

/// Obtain a durable shared link for an uploaded object.
///
/// Lists existing direct links first and returns the first one verbatim when
/// any exist; only an unlinked path gets a create call. Link creation is not
/// idempotent at the store level, so this list-then-create order is what
/// keeps repeated runs from churning out duplicate links (or tripping the
/// store's duplicate-link error).
#[instrument(skip(store))]
pub async fn get_or_create_shared_link(
    store: &dyn ObjectStore,
    path: &str,
) -> AtelierResult<String> {
    let links = store.list_shared_links(path).await?;
    if let Some(link) = links.first() {
        debug!(path = %path, url = %link.url, "Reusing existing shared link");
        return Ok(link.url.clone());
    }
    let link = store.create_shared_link(path).await?;
    debug!(path = %path, url = %link.url, "Created shared link");
    Ok(link.url)
}
