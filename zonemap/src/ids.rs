use crate::model::ZoneId;

/// Injected source of zone identifiers. Implementations must never repeat a
/// token for the lifetime of a store.
pub trait IdSource {
    fn next_id(&mut self) -> ZoneId;

    /// Called with ids adopted from outside (a loaded document) so the
    /// source can avoid handing them out again.
    fn reserve(&mut self, _used: &[ZoneId]) {}
}

/// `prefix-1`, `prefix-2`, ... Deterministic, for tests and hosts without a
/// better source.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ZoneId {
        let id = ZoneId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// Skip past every `prefix-N` already in use.
    fn reserve(&mut self, used: &[ZoneId]) {
        let lead = format!("{}-", self.prefix);
        for id in used {
            if let Some(n) = id.as_str().strip_prefix(&lead).and_then(|s| s.parse::<u64>().ok()) {
                self.next = self.next.max(n.saturating_add(1));
            }
        }
    }
}

impl<F> IdSource for F
where
    F: FnMut() -> ZoneId,
{
    fn next_id(&mut self) -> ZoneId {
        self()
    }
}
