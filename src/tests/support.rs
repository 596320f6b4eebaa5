use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::{Map, Value};

use crate::creation::{AddOptionLink, CreationFlow, CreationOutcome};
use crate::reference::{Collection, RefOption, ReferenceFetcher, ReferenceKind, collection};
use crate::signal::WidgetEvent;

pub(crate) fn options(pairs: &[(&str, &str)]) -> Collection {
    collection(pairs.iter().map(|(id, label)| RefOption::new(*id, *label)))
}

pub(crate) fn crops() -> Collection {
    options(&[("BEAN", "Bean"), ("CARROT", "Carrot"), ("KALE", "Kale")])
}

pub(crate) fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

pub(crate) fn records(values: Vec<Value>) -> Vec<Map<String, Value>> {
    values.into_iter().map(record).collect()
}

pub(crate) fn valid_events<T>(events: &[WidgetEvent<T>]) -> Vec<bool> {
    events.iter().filter_map(WidgetEvent::as_valid).collect()
}

pub(crate) fn updates<T: Clone>(events: &[WidgetEvent<T>]) -> Vec<T> {
    events
        .iter()
        .filter_map(WidgetEvent::as_update)
        .cloned()
        .collect()
}

/// Counts fetches; the first fetch can be held open until the test releases
/// it, and any fetch can be made to fail.
pub(crate) struct GatedFetcher {
    calls: AtomicUsize,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    fail: Mutex<bool>,
    options: Vec<RefOption>,
}

impl GatedFetcher {
    pub(crate) fn new(options: Vec<RefOption>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
            fail: Mutex::new(false),
            options,
        })
    }

    pub(crate) fn gated(options: Vec<RefOption>) -> (Arc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let fetcher = Self::new(options);
        *fetcher.gate.lock().unwrap() = Some(rx);
        (fetcher, tx)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl ReferenceFetcher for GatedFetcher {
    fn fetch(&self, _kind: &ReferenceKind) -> BoxFuture<'static, anyhow::Result<Vec<RefOption>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        let fail = *self.fail.lock().unwrap();
        let options = self.options.clone();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if fail {
                anyhow::bail!("connection refused");
            }
            Ok(options)
        }
        .boxed()
    }
}

/// Creation flow that answers with a prepared outcome and records the links
/// it was launched with.
pub(crate) struct ScriptedFlow {
    pub(crate) outcome: CreationOutcome,
    pub(crate) launched: Vec<AddOptionLink>,
}

impl ScriptedFlow {
    pub(crate) fn creating(option: RefOption) -> Self {
        Self {
            outcome: CreationOutcome::Created(option),
            launched: Vec::new(),
        }
    }

    pub(crate) fn cancelling() -> Self {
        Self {
            outcome: CreationOutcome::Cancelled,
            launched: Vec::new(),
        }
    }
}

impl CreationFlow for ScriptedFlow {
    fn launch(&mut self, link: &AddOptionLink) -> BoxFuture<'_, CreationOutcome> {
        self.launched.push(link.clone());
        future::ready(self.outcome.clone()).boxed()
    }
}
