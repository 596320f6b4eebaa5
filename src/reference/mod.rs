mod cache;
mod fixture;
mod kind;
mod option;

use std::sync::Arc;

pub use cache::{FnFetcher, ReferenceCache, ReferenceFetcher, fetch_fn};
pub use fixture::FixtureFetcher;
pub use kind::ReferenceKind;
pub use option::RefOption;
pub(crate) use option::{contains, position};

/// A resolved reference collection. Clones share one allocation, so
/// `Arc::ptr_eq` tells whether two callers observed the same fetch.
pub type Collection = Arc<[RefOption]>;

pub fn collection(options: impl IntoIterator<Item = RefOption>) -> Collection {
    options.into_iter().collect()
}

pub fn empty_collection() -> Collection {
    Arc::from(Vec::new())
}
