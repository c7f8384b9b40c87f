//! Reference-counted GPU textures, decoded in the background.
//!
//! Decoding happens on detached worker threads. Uploading happens on the thread that owns the
//! graphics context: workers post a closure onto the [`MainThreadQueue`], which that thread
//! drains once per frame (see [`TextureCache::drain_uploads`]). A handle becomes visible only
//! once its upload closure has run.
//!
//! In-flight decodes are never cancelled. Each load carries a ticket; an upload whose ticket no
//! longer matches the entry (because it was released, or released and re-requested) is dropped.

use crate::backend::{GpuContext, ImageHandle};
use crate::error::Error;
use crate::main_thread::MainThreadQueue;
use crate::services::{DecodedImage, ImageDecoder};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Load state of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not requested yet.
    Idle,
    /// A worker is decoding, or the upload is queued.
    Loading,
    /// The handle is available.
    Ready,
    /// Decoding or uploading failed; holds the reason. Not retried automatically.
    Failed(String),
}

#[derive(Debug)]
struct Entry {
    handle: Option<ImageHandle>,
    refs: usize,
    state: LoadState,
    /// Ticket of the current load, if any.
    ticket: Option<Uuid>,
    dimensions: Option<(u32, u32)>,
}

impl Entry {
    fn new() -> Entry {
        Entry {
            handle: None,
            refs: 0,
            state: LoadState::Idle,
            ticket: None,
            dimensions: None,
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    entries: Mutex<HashMap<String, Entry>>,
}

impl Shared {
    fn is_wanted(&self, key: &str, ticket: Uuid) -> bool {
        self.entries
            .lock()
            .get(key)
            .map_or(false, |entry| entry.ticket == Some(ticket))
    }

    fn fail(&self, key: &str, ticket: Uuid, reason: String) {
        if let Some(entry) = self.entries.lock().get_mut(key) {
            if entry.ticket == Some(ticket) {
                entry.state = LoadState::Failed(reason);
                entry.ticket = None;
            }
        }
    }

    /// Runs on the main thread.
    fn upload(&self, key: &str, ticket: Uuid, image: DecodedImage, gpu: &mut dyn GpuContext) {
        if !self.is_wanted(key, ticket) {
            warn!(path = key, "discarding upload for a texture that is no longer wanted");
            return;
        }

        let handle = gpu.create_image_rgba(image.width, image.height, &image.pixels);

        let mut entries = self.entries.lock();
        let still_wanted = entries
            .get(key)
            .map_or(false, |entry| entry.ticket == Some(ticket));
        if !still_wanted {
            // released while uploading
            drop(entries);
            if let Some(handle) = handle {
                gpu.delete_image(handle);
            }
            return;
        }
        let entry = match entries.get_mut(key) {
            Some(entry) => entry,
            None => return,
        };

        entry.ticket = None;
        match handle {
            Some(handle) => {
                debug!(path = key, width = image.width, height = image.height, "texture uploaded");
                entry.handle = Some(handle);
                entry.dimensions = Some((image.width, image.height));
                entry.state = LoadState::Ready;
            }
            None => {
                let err = Error::Upload {
                    path: key.to_string(),
                };
                error!(path = key, %err, "texture upload failed");
                entry.state = LoadState::Failed(err.to_string());
            }
        }
    }
}

/// Maps image paths to GPU textures.
///
/// Cloning yields another handle to the same cache; every clone must be used for GPU operations
/// on the thread that created the original.
#[derive(Clone)]
pub struct TextureCache {
    shared: Arc<Shared>,
    decoder: Arc<dyn ImageDecoder>,
    queue: MainThreadQueue,
    owner: ThreadId,
}

/// Cache keys use forward slashes regardless of platform.
fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

impl TextureCache {
    /// Creates a cache owned by the calling thread.
    pub fn new(decoder: Arc<dyn ImageDecoder>) -> TextureCache {
        TextureCache {
            shared: Arc::default(),
            decoder,
            queue: MainThreadQueue::new(),
            owner: thread::current().id(),
        }
    }

    fn debug_assert_owner(&self) {
        debug_assert_eq!(
            thread::current().id(),
            self.owner,
            "texture cache GPU operation off the thread owning the graphics context"
        );
    }

    /// Adds a reference to the texture for `path`, creating the entry if needed.
    ///
    /// Doesn't load anything; see [`request_load`](TextureCache::request_load).
    pub fn acquire(&self, path: &str) {
        let mut entries = self.shared.entries.lock();
        let entry = entries.entry(normalize(path)).or_insert_with(Entry::new);
        entry.refs += 1;
    }

    /// Drops a reference. The last reference frees the GPU handle and erases the entry.
    ///
    /// Releasing an unknown path is a logged no-op.
    pub fn release(&self, path: &str, gpu: &mut dyn GpuContext) {
        self.debug_assert_owner();
        let key = normalize(path);
        let handle = {
            let mut entries = self.shared.entries.lock();
            let entry = match entries.get_mut(&key) {
                Some(entry) => entry,
                None => {
                    warn!(path = %key, "release of a texture that isn't cached");
                    return;
                }
            };
            entry.refs = entry.refs.saturating_sub(1);
            if entry.refs > 0 {
                return;
            }
            entries.remove(&key).and_then(|entry| entry.handle)
        };
        if let Some(handle) = handle {
            gpu.delete_image(handle);
        }
    }

    /// Starts decoding `path` on a worker thread.
    ///
    /// Creates an unreferenced entry if there is none. Does nothing while the texture is loading,
    /// once it is ready, and after it failed (see [`retry_failed`](TextureCache::retry_failed)).
    pub fn request_load(&self, path: &str) {
        let key = normalize(path);
        let ticket = Uuid::new_v4();
        {
            let mut entries = self.shared.entries.lock();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            if entry.state != LoadState::Idle {
                return;
            }
            entry.state = LoadState::Loading;
            entry.ticket = Some(ticket);
        }

        let shared = Arc::clone(&self.shared);
        let decoder = Arc::clone(&self.decoder);
        let queue = self.queue.clone();
        let file = PathBuf::from(path);
        let worker_key = key.clone();

        let spawned = thread::Builder::new()
            .name("texture-decode".into())
            .spawn(move || {
                let key = worker_key;
                match decoder.decode(&file, 4) {
                    Ok(image) => queue.post(Box::new(move |gpu: &mut dyn GpuContext| {
                        shared.upload(&key, ticket, image, gpu)
                    })),
                    Err(err) => {
                        error!(path = %file.display(), %err, "failed to decode image");
                        shared.fail(&key, ticket, err.to_string());
                    }
                }
            });

        if let Err(err) = spawned {
            error!(path = %key, %err, "failed to spawn decode worker");
            self.shared.fail(&key, ticket, err.to_string());
        }
    }

    /// Requests the texture again if its previous load failed.
    pub fn retry_failed(&self, path: &str) {
        let key = normalize(path);
        {
            let mut entries = self.shared.entries.lock();
            match entries.get_mut(&key) {
                Some(entry) if matches!(entry.state, LoadState::Failed(_)) => {
                    entry.state = LoadState::Idle;
                }
                _ => return,
            }
        }
        self.request_load(path);
    }

    /// Returns the GPU handle, if the texture has been uploaded.
    pub fn handle(&self, path: &str) -> Option<ImageHandle> {
        self.shared
            .entries
            .lock()
            .get(&normalize(path))
            .and_then(|entry| entry.handle)
    }

    /// Returns the load state, or `None` if the path isn't cached.
    pub fn state(&self, path: &str) -> Option<LoadState> {
        self.shared
            .entries
            .lock()
            .get(&normalize(path))
            .map(|entry| entry.state.clone())
    }

    /// Returns the pixel size of an uploaded texture.
    pub fn dimensions(&self, path: &str) -> Option<(u32, u32)> {
        self.shared
            .entries
            .lock()
            .get(&normalize(path))
            .and_then(|entry| entry.dimensions)
    }

    pub fn refcount(&self, path: &str) -> usize {
        self.shared
            .entries
            .lock()
            .get(&normalize(path))
            .map_or(0, |entry| entry.refs)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.shared.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of decoded images waiting for upload.
    pub fn pending_uploads(&self) -> usize {
        self.queue.len()
    }

    /// Runs the queued uploads. Must be called on the owning thread, once per frame.
    pub fn drain_uploads(&self, gpu: &mut dyn GpuContext) -> usize {
        self.debug_assert_owner();
        self.queue.drain(gpu)
    }

    /// Frees and erases every entry whose refcount is zero.
    pub fn purge_unreferenced(&self, gpu: &mut dyn GpuContext) {
        self.debug_assert_owner();
        let handles: Vec<_> = {
            let mut entries = self.shared.entries.lock();
            let keys: Vec<_> = entries
                .iter()
                .filter(|(_, entry)| entry.refs == 0)
                .map(|(key, _)| key.clone())
                .collect();
            keys.iter()
                .filter_map(|key| entries.remove(key).and_then(|entry| entry.handle))
                .collect()
        };
        for handle in handles {
            gpu.delete_image(handle);
        }
    }

    /// Frees every resident texture and empties the cache.
    pub fn cleanup_all(&self, gpu: &mut dyn GpuContext) {
        self.debug_assert_owner();
        let entries: Vec<_> = self.shared.entries.lock().drain().collect();
        for (_, entry) in entries {
            if let Some(handle) = entry.handle {
                gpu.delete_image(handle);
            }
        }
    }
}
