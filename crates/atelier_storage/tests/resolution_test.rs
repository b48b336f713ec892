//! Tests for path resolution, chunked upload and link reuse against an
//! in-memory store.

use atelier_error::{AtelierErrorKind, AtelierResult, StorageError, StorageErrorKind};
use atelier_storage::{
    CHUNK_SIZE, ObjectMetadata, ObjectStore, Probe, SharedLink, get_or_create_shared_link,
    resolve_unique_path, upload_chunked,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory object store that counts calls.
#[derive(Default)]
struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    sessions: Mutex<HashMap<String, Vec<u8>>>,
    links: Mutex<HashMap<String, String>>,
    upload_calls: Mutex<u32>,
    append_calls: Mutex<u32>,
    create_link_calls: Mutex<u32>,
    next_session: Mutex<u32>,
    /// When true, every probe fails with a remote error.
    probe_fails: bool,
    /// When true, every probe reports the path as occupied.
    always_found: bool,
}

impl MemoryStore {
    fn with_objects(paths: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut objects = store.objects.lock().unwrap();
            for path in paths {
                objects.insert(path.to_string(), Vec::new());
            }
        }
        store
    }

    fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(path).cloned()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn probe(&self, path: &str) -> AtelierResult<Probe> {
        if self.probe_fails {
            return Err(StorageError::new(StorageErrorKind::Remote(
                "probe exploded".to_string(),
            ))
            .into());
        }
        if self.always_found || self.objects.lock().unwrap().contains_key(path) {
            return Ok(Probe::Found(ObjectMetadata {
                path: path.to_string(),
                size: None,
            }));
        }
        Ok(Probe::Missing)
    }

    async fn upload(&self, bytes: &[u8], path: &str) -> AtelierResult<()> {
        *self.upload_calls.lock().unwrap() += 1;
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(path) {
            return Err(StorageError::new(StorageErrorKind::Conflict(path.to_string())).into());
        }
        objects.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn session_start(&self, chunk: &[u8]) -> AtelierResult<String> {
        let mut next = self.next_session.lock().unwrap();
        *next += 1;
        let id = format!("session-{}", *next);
        self.sessions.lock().unwrap().insert(id.clone(), chunk.to_vec());
        Ok(id)
    }

    async fn session_append(
        &self,
        session_id: &str,
        offset: u64,
        chunk: &[u8],
    ) -> AtelierResult<()> {
        *self.append_calls.lock().unwrap() += 1;
        let mut sessions = self.sessions.lock().unwrap();
        let buffer = sessions.get_mut(session_id).ok_or_else(|| {
            StorageError::new(StorageErrorKind::Session(format!(
                "unknown session {session_id}"
            )))
        })?;
        if buffer.len() as u64 != offset {
            return Err(StorageError::new(StorageErrorKind::Session(format!(
                "offset {offset} does not match {} transmitted bytes",
                buffer.len()
            )))
            .into());
        }
        buffer.extend_from_slice(chunk);
        Ok(())
    }

    async fn session_finish(
        &self,
        session_id: &str,
        offset: u64,
        chunk: &[u8],
        path: &str,
    ) -> AtelierResult<()> {
        self.session_append(session_id, offset, chunk).await?;
        *self.append_calls.lock().unwrap() -= 1;
        let payload = self.sessions.lock().unwrap().remove(session_id).ok_or_else(|| {
            StorageError::new(StorageErrorKind::Session(format!(
                "unknown session {session_id}"
            )))
        })?;
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(path) {
            return Err(StorageError::new(StorageErrorKind::Conflict(path.to_string())).into());
        }
        objects.insert(path.to_string(), payload);
        Ok(())
    }

    async fn list_shared_links(&self, path: &str) -> AtelierResult<Vec<SharedLink>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .get(path)
            .map(|url| {
                vec![SharedLink {
                    path: path.to_string(),
                    url: url.clone(),
                }]
            })
            .unwrap_or_default())
    }

    async fn create_shared_link(&self, path: &str) -> AtelierResult<SharedLink> {
        *self.create_link_calls.lock().unwrap() += 1;
        let url = format!("https://www.dropbox.com/s/{}{}?dl=0", "mem", path.replace('/', "-"));
        self.links
            .lock()
            .unwrap()
            .insert(path.to_string(), url.clone());
        Ok(SharedLink {
            path: path.to_string(),
            url,
        })
    }
}

#[tokio::test]
async fn fresh_path_resolves_without_suffix() {
    let store = MemoryStore::default();
    let path = resolve_unique_path(&store, "/assets/brick", "png").await.unwrap();
    assert_eq!(path, "/assets/brick.png");
}

#[tokio::test]
async fn occupied_paths_get_counted_suffixes() {
    let store = MemoryStore::with_objects(&[
        "/assets/brick.png",
        "/assets/brick_1.png",
        "/assets/brick_2.png",
    ]);
    let path = resolve_unique_path(&store, "/assets/brick", "png").await.unwrap();
    assert_eq!(path, "/assets/brick_3.png");
}

#[tokio::test]
async fn resolution_is_bounded() {
    let store = MemoryStore {
        always_found: true,
        ..Default::default()
    };
    let err = resolve_unique_path(&store, "/assets/brick", "png")
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        AtelierErrorKind::Storage(StorageError {
            kind: StorageErrorKind::ResolutionExhausted { .. },
            ..
        })
    ));
}

#[tokio::test]
async fn probe_errors_propagate_instead_of_resolving() {
    let store = MemoryStore {
        probe_fails: true,
        ..Default::default()
    };
    let err = resolve_unique_path(&store, "/assets/brick", "png")
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        AtelierErrorKind::Storage(StorageError {
            kind: StorageErrorKind::Remote(_),
            ..
        })
    ));
}

#[tokio::test]
async fn small_payload_uses_a_single_upload_call() {
    let store = MemoryStore::default();
    let payload = vec![7u8; CHUNK_SIZE];
    upload_chunked(&store, &payload, "/assets/small.bin").await.unwrap();
    assert_eq!(*store.upload_calls.lock().unwrap(), 1);
    assert_eq!(store.object("/assets/small.bin").unwrap(), payload);
}

#[tokio::test]
async fn large_payload_reassembles_byte_for_byte() {
    let store = MemoryStore::default();
    // Not a multiple of the chunk size, so the final chunk is a remainder.
    let payload: Vec<u8> = (0..CHUNK_SIZE * 2 + 12345).map(|i| (i % 251) as u8).collect();
    upload_chunked(&store, &payload, "/assets/large.bin").await.unwrap();
    assert_eq!(*store.upload_calls.lock().unwrap(), 0);
    assert_eq!(store.object("/assets/large.bin").unwrap(), payload);
}

#[tokio::test]
async fn chunk_multiple_payload_commits_on_the_boundary() {
    let store = MemoryStore::default();
    let payload = vec![9u8; CHUNK_SIZE * 3];
    upload_chunked(&store, &payload, "/assets/even.bin").await.unwrap();
    assert_eq!(store.object("/assets/even.bin").unwrap(), payload);
    // start + one append + finish covers three chunks
    assert_eq!(*store.append_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn upload_never_overwrites() {
    let store = MemoryStore::with_objects(&["/assets/taken.png"]);
    let err = upload_chunked(&store, &[1, 2, 3], "/assets/taken.png")
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        AtelierErrorKind::Storage(StorageError {
            kind: StorageErrorKind::Conflict(_),
            ..
        })
    ));
}

#[tokio::test]
async fn shared_link_is_created_once_and_reused() {
    let store = MemoryStore::default();
    let first = get_or_create_shared_link(&store, "/assets/brick.png").await.unwrap();
    let second = get_or_create_shared_link(&store, "/assets/brick.png").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(*store.create_link_calls.lock().unwrap(), 1);
}
