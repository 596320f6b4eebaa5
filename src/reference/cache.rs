use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use super::{Collection, RefOption, ReferenceKind};
use crate::error::FetchError;
use crate::options::EngineOptions;

/// Source of reference collections, typically an HTTP client.
pub trait ReferenceFetcher: Send + Sync {
    fn fetch(&self, kind: &ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>>;
}

impl<T: ReferenceFetcher + ?Sized> ReferenceFetcher for Arc<T> {
    fn fetch(&self, kind: &ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>> {
        (**self).fetch(kind)
    }
}

/// Adapts a closure into a [`ReferenceFetcher`].
pub struct FnFetcher<F>(F);

pub fn fetch_fn<F>(fetch: F) -> FnFetcher<F>
where
    F: Fn(&ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>> + Send + Sync,
{
    FnFetcher(fetch)
}

impl<F> ReferenceFetcher for FnFetcher<F>
where
    F: Fn(&ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>> + Send + Sync,
{
    fn fetch(&self, kind: &ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>> {
        (self.0)(kind)
    }
}

type PendingFetch = Shared<BoxFuture<'static, Result<Collection, FetchError>>>;

enum Entry {
    InFlight { generation: u64, fetch: PendingFetch },
    Resolved(Collection),
}

struct CacheInner {
    fetcher: Arc<dyn ReferenceFetcher>,
    messages: HashMap<String, String>,
    entries: Mutex<HashMap<String, Entry>>,
    generation: AtomicU64,
}

/// Process-wide store of reference collections.
///
/// The handle is cheap to clone; every clone sees the same entries. At most
/// one fetch is in flight per key and concurrent `get`s await that same
/// fetch. Failures are handed to every waiter and leave no entry behind, so
/// the next `get` fetches again. Entries never expire on their own.
#[derive(Clone)]
pub struct ReferenceCache {
    inner: Arc<CacheInner>,
}

impl ReferenceCache {
    pub fn new(fetcher: impl ReferenceFetcher + 'static) -> Self {
        Self::shared(Arc::new(fetcher))
    }

    pub fn shared(fetcher: Arc<dyn ReferenceFetcher>) -> Self {
        Self::build(fetcher, HashMap::new())
    }

    pub fn with_options(fetcher: Arc<dyn ReferenceFetcher>, options: &EngineOptions) -> Self {
        Self::build(fetcher, options.fetch_messages().clone())
    }

    fn build(fetcher: Arc<dyn ReferenceFetcher>, messages: HashMap<String, String>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                fetcher,
                messages,
                entries: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub async fn get(&self, kind: &ReferenceKind) -> Result<Collection, FetchError> {
        let (generation, fetch) = {
            let mut entries = self.entries();
            match entries.get(kind.key()) {
                Some(Entry::Resolved(collection)) => {
                    debug!(key = kind.key(), "reference cache hit");
                    return Ok(Arc::clone(collection));
                }
                Some(Entry::InFlight { generation, fetch }) => {
                    debug!(key = kind.key(), "joining in-flight reference fetch");
                    (*generation, fetch.clone())
                }
                None => {
                    debug!(key = kind.key(), "reference cache miss, fetching");
                    let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
                    let fetch = self.start_fetch(kind);
                    entries.insert(
                        kind.key().to_string(),
                        Entry::InFlight {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    (generation, fetch)
                }
            }
        };
        let result = fetch.await;
        self.settle(kind, generation, &result);
        result
    }

    /// Resolved collection for `kind`, without fetching.
    pub fn peek(&self, kind: &ReferenceKind) -> Option<Collection> {
        match self.entries().get(kind.key()) {
            Some(Entry::Resolved(collection)) => Some(Arc::clone(collection)),
            _ => None,
        }
    }

    pub fn is_pending(&self, kind: &ReferenceKind) -> bool {
        matches!(self.entries().get(kind.key()), Some(Entry::InFlight { .. }))
    }

    /// Drops the resolved or in-flight entry for `kind`. Callers already
    /// awaiting an in-flight fetch still receive its result, but it is not
    /// stored.
    pub fn invalidate(&self, kind: &ReferenceKind) {
        if self.entries().remove(kind.key()).is_some() {
            debug!(key = kind.key(), "reference cache entry invalidated");
        }
    }

    pub fn reset(&self) {
        self.entries().clear();
        debug!("reference cache reset");
    }

    pub fn message_for(&self, kind: &ReferenceKind) -> String {
        self.inner
            .messages
            .get(kind.key())
            .cloned()
            .unwrap_or_else(|| kind.fetch_error_message())
    }

    fn start_fetch(&self, kind: &ReferenceKind) -> PendingFetch {
        let request = self.inner.fetcher.fetch(kind);
        let kind = kind.clone();
        let message = self.message_for(&kind);
        async move {
            match request.await {
                Ok(options) => Ok(Collection::from(options)),
                Err(err) => Err(FetchError {
                    kind,
                    message,
                    detail: format!("{err:#}"),
                }),
            }
        }
        .boxed()
        .shared()
    }

    fn settle(&self, kind: &ReferenceKind, generation: u64, result: &Result<Collection, FetchError>) {
        let mut entries = self.entries();
        let current = matches!(
            entries.get(kind.key()),
            Some(Entry::InFlight { generation: live, .. }) if *live == generation
        );
        if !current {
            return;
        }
        match result {
            Ok(collection) => {
                entries.insert(
                    kind.key().to_string(),
                    Entry::Resolved(Arc::clone(collection)),
                );
            }
            Err(err) => {
                warn!(key = kind.key(), detail = %err.detail, "reference fetch failed");
                entries.remove(kind.key());
            }
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ReferenceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        let mut keys: Vec<_> = entries
            .iter()
            .map(|(key, entry)| {
                let state = match entry {
                    Entry::InFlight { .. } => "in-flight",
                    Entry::Resolved(_) => "resolved",
                };
                (key.clone(), state)
            })
            .collect();
        keys.sort();
        f.debug_struct("ReferenceCache")
            .field("entries", &keys)
            .finish()
    }
}
