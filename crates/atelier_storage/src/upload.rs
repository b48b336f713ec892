//! Chunked upload over the session protocol.

use crate::ObjectStore;
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use tracing::{debug, instrument};

/// Single-call size limit; payloads above this go through an upload session.
pub const CHUNK_SIZE: usize = 4 * 1024 * 1024;

/// Explicit state of a session upload.
///
/// The finish transition is only reachable when the remaining bytes fit in
/// one final chunk, i.e. `offset + chunk.len() == total`. Keeping the state
/// tagged makes the chunk boundary arithmetic testable in isolation; an
/// off-by-one here would corrupt the committed object silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// No session opened yet
    NotStarted,
    /// Session open; `offset` bytes already transmitted
    InProgress {
        /// Store-issued session identifier
        session_id: String,
        /// Bytes transmitted so far
        offset: u64,
    },
    /// Session committed to its destination path
    Finished,
}

impl UploadState {
    /// Byte range `[offset, end)` of the next chunk and whether it is final.
    ///
    /// Returns an error when called with `offset >= total`, which would mean
    /// the state machine was driven past its payload.
    pub fn next_chunk(&self, total: usize) -> AtelierResult<(usize, usize, bool)> {
        let offset = match self {
            UploadState::NotStarted => 0,
            UploadState::InProgress { offset, .. } => *offset as usize,
            UploadState::Finished => {
                return Err(StorageError::new(StorageErrorKind::Session(
                    "next_chunk called on finished upload".to_string(),
                ))
                .into());
            }
        };
        if offset >= total {
            return Err(StorageError::new(StorageErrorKind::Session(format!(
                "offset {offset} beyond payload of {total} bytes"
            )))
            .into());
        }
        let end = usize::min(offset + CHUNK_SIZE, total);
        Ok((offset, end, end == total))
    }
}

/// Upload a payload to `path`, chunking through an upload session when it
/// exceeds [`CHUNK_SIZE`].
///
/// Creates exactly one object at `path` and fails without overwriting if the
/// destination is occupied. For payloads within the single-call limit exactly
/// one `upload` call is issued; larger payloads are split into
/// `[offset, offset + CHUNK_SIZE)` chunks with the last chunk sized to the
/// remainder, so the transmitted bytes reassemble the payload exactly.
#[instrument(skip(store, bytes), fields(size = bytes.len()))]
pub async fn upload_chunked(
    store: &dyn ObjectStore,
    bytes: &[u8],
    path: &str,
) -> AtelierResult<()> {
    let total = bytes.len();
    if total <= CHUNK_SIZE {
        store.upload(bytes, path).await?;
        debug!(path = %path, size = total, "Uploaded in a single call");
        return Ok(());
    }

    let mut state = UploadState::NotStarted;
    while state != UploadState::Finished {
        let (start, end, last) = state.next_chunk(total)?;
        let chunk = &bytes[start..end];
        state = match state {
            UploadState::NotStarted => {
                let session_id = store.session_start(chunk).await?;
                debug!(session = %session_id, sent = end, "Started upload session");
                UploadState::InProgress {
                    session_id,
                    offset: end as u64,
                }
            }
            UploadState::InProgress { session_id, offset } => {
                if last {
                    store.session_finish(&session_id, offset, chunk, path).await?;
                    debug!(session = %session_id, path = %path, size = total, "Finished upload session");
                    UploadState::Finished
                } else {
                    store.session_append(&session_id, offset, chunk).await?;
                    UploadState::InProgress {
                        session_id,
                        offset: end as u64,
                    }
                }
            }
            UploadState::Finished => unreachable!("loop exits on Finished"),
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_chunk_is_bounded() {
        let state = UploadState::NotStarted;
        let (start, end, last) = state.next_chunk(CHUNK_SIZE * 2 + 7).unwrap();
        assert_eq!((start, end), (0, CHUNK_SIZE));
        assert!(!last);
    }

    #[test]
    fn final_chunk_is_the_remainder() {
        let state = UploadState::InProgress {
            session_id: "s".to_string(),
            offset: (CHUNK_SIZE * 2) as u64,
        };
        let (start, end, last) = state.next_chunk(CHUNK_SIZE * 2 + 7).unwrap();
        assert_eq!((start, end), (CHUNK_SIZE * 2, CHUNK_SIZE * 2 + 7));
        assert!(last);
    }

    #[test]
    fn exact_multiple_closes_on_the_boundary() {
        let state = UploadState::InProgress {
            session_id: "s".to_string(),
            offset: CHUNK_SIZE as u64,
        };
        let (start, end, last) = state.next_chunk(CHUNK_SIZE * 2).unwrap();
        assert_eq!((start, end), (CHUNK_SIZE, CHUNK_SIZE * 2));
        assert!(last);
    }

    #[test]
    fn driving_past_the_payload_is_an_error() {
        let state = UploadState::InProgress {
            session_id: "s".to_string(),
            offset: 10,
        };
        assert!(state.next_chunk(10).is_err());
        assert!(UploadState::Finished.next_chunk(10).is_err());
    }
}
