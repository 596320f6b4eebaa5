use crate::reference::{Collection, RefOption, ReferenceCache, ReferenceKind, contains};
use crate::signal::{Emitter, ValidityLatch, WidgetEvent};

pub(crate) fn publish_validity<T>(
    latch: &mut ValidityLatch,
    events: &mut Emitter<WidgetEvent<T>>,
    valid: bool,
) {
    if let Some(edge) = latch.observe(valid) {
        events.emit(WidgetEvent::Valid(edge));
    }
}

/// `options` with `option` appended, unless an option with the same id is
/// already present.
pub(crate) fn with_option(options: &Collection, option: &RefOption) -> Collection {
    if contains(options, &option.id) {
        return options.clone();
    }
    options.iter().cloned().chain([option.clone()]).collect()
}

/// Fetch `kind` through the cache, turning a failure into the message the
/// widget emits as its `Error` signal.
pub(crate) async fn fetch_options(
    cache: &ReferenceCache,
    kind: &ReferenceKind,
) -> Result<Collection, String> {
    cache.get(kind).await.map_err(|err| err.message)
}

pub(crate) fn step_index(current: usize, len: usize, delta: i32, wrap: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len as i64 - 1;
    let next = current as i64 + delta as i64;
    let bounded = if wrap {
        next.rem_euclid(len as i64)
    } else {
        next.clamp(0, last)
    };
    bounded as usize
}
