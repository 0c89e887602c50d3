use std::collections::HashMap;

use chrono::Utc;

use super::{LineageEvent, LineageEventKind};

/// Almacenamiento de eventos append-only, agrupados por nombre de corrida.
pub trait EventStore {
    /// Agrega un evento y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, run: &str, kind: LineageEventKind) -> LineageEvent;
    /// Lista eventos de una corrida (orden ascendente por seq).
    fn list(&self, run: &str) -> Vec<LineageEvent>;
}

#[derive(Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<String, Vec<LineageEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, run: &str, kind: LineageEventKind) -> LineageEvent {
        let vec = self.inner.entry(run.to_string()).or_default();
        let seq = vec.len() as u64;
        let ev = LineageEvent { seq,
                                run: run.to_string(),
                                kind,
                                ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, run: &str) -> Vec<LineageEvent> {
        self.inner.get(run).cloned().unwrap_or_default()
    }
}
