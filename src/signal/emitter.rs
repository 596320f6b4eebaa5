use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener<E> = Box<dyn FnMut(&E) + Send>;

/// Typed outbound channel of a widget.
///
/// Listeners run synchronously inside `emit`. Every event is also queued in an
/// outbox so consumers that attach late (or never) can still drain what was
/// emitted during construction.
pub struct Emitter<E> {
    listeners: Vec<(Subscription, Listener<E>)>,
    outbox: VecDeque<E>,
    next_id: u64,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            outbox: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + Send + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: E) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.outbox.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<E> {
        self.outbox.drain(..).collect()
    }

    pub fn pending(&self) -> impl Iterator<Item = &E> {
        self.outbox.iter()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .field("outbox", &self.outbox)
            .finish()
    }
}
