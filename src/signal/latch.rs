/// Remembers the last published validity so it is only re-published on an edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityLatch {
    last: Option<bool>,
}

impl ValidityLatch {
    /// Returns `Some(valid)` on the first observation and whenever the value
    /// flips; `None` otherwise.
    pub fn observe(&mut self, valid: bool) -> Option<bool> {
        if self.last == Some(valid) {
            return None;
        }
        tracing::trace!(valid, "validity edge");
        self.last = Some(valid);
        Some(valid)
    }

    pub fn current(&self) -> Option<bool> {
        self.last
    }
}
