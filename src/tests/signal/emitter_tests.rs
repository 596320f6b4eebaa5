use std::sync::{Arc, Mutex};

use crate::signal::{Emitter, ValidityLatch, WidgetEvent};

#[test]
fn listeners_see_events_in_emission_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut emitter: Emitter<WidgetEvent<u32>> = Emitter::new();
    let sink = Arc::clone(&seen);
    emitter.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    emitter.emit(WidgetEvent::Ready);
    emitter.emit(WidgetEvent::Update(3));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![WidgetEvent::Ready, WidgetEvent::Update(3)]
    );
}

#[test]
fn outbox_keeps_events_until_drained() {
    let mut emitter: Emitter<WidgetEvent<u32>> = Emitter::new();
    emitter.emit(WidgetEvent::Valid(true));
    assert_eq!(emitter.pending().count(), 1);

    assert_eq!(emitter.drain(), vec![WidgetEvent::Valid(true)]);
    assert!(emitter.drain().is_empty());
}

#[test]
fn unsubscribed_listeners_stop_receiving() {
    let seen = Arc::new(Mutex::new(0usize));
    let mut emitter: Emitter<WidgetEvent<u32>> = Emitter::new();
    let sink = Arc::clone(&seen);
    let subscription = emitter.subscribe(move |_| *sink.lock().unwrap() += 1);

    emitter.emit(WidgetEvent::Ready);
    assert!(emitter.unsubscribe(subscription));
    assert!(!emitter.unsubscribe(subscription));
    emitter.emit(WidgetEvent::Ready);

    assert_eq!(*seen.lock().unwrap(), 1);
}

#[test]
fn latch_reports_first_value_and_edges_only() {
    let mut latch = ValidityLatch::default();
    assert_eq!(latch.observe(false), Some(false));
    assert_eq!(latch.observe(false), None);
    assert_eq!(latch.observe(true), Some(true));
    assert_eq!(latch.observe(true), None);
    assert_eq!(latch.current(), Some(true));
}
