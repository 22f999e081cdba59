use super::PlaybackSnapshot;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

type Listener = Box<dyn FnMut(&PlaybackSnapshot) + Send>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
    /// Ids unsubscribed while their listener was out of the table being run.
    dropped: HashSet<u64>,
}

fn lock(table: &Mutex<ListenerTable>) -> MutexGuard<'_, ListenerTable> {
    table.lock().unwrap_or_else(|e| e.into_inner())
}

/// Registry of snapshot listeners.
///
/// Cloning shares the registry, so a listener added through one clone is
/// notified by all of them. Listeners run synchronously on whichever thread
/// calls [`Listeners::notify`], outside the registry lock, so a callback may
/// subscribe or drop a [`Subscription`]. A listener added from a callback is
/// first called on the next notification.
#[derive(Clone, Default)]
pub struct Listeners {
    table: Arc<Mutex<ListenerTable>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PlaybackSnapshot) + Send + 'static,
    {
        let mut table = lock(&self.table);
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, Box::new(listener)));

        Subscription {
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    pub fn notify(&self, snapshot: &PlaybackSnapshot) {
        let mut running = std::mem::take(&mut lock(&self.table).entries);
        for (_, listener) in running.iter_mut() {
            listener(snapshot);
        }

        let mut table = lock(&self.table);
        let ListenerTable {
            entries, dropped, ..
        } = &mut *table;

        running.retain(|(id, _)| !dropped.remove(id));
        // Anything in the table now was subscribed by a callback
        running.append(entries);
        *entries = running;
    }

    pub fn len(&self) -> usize {
        self.table
            .lock()
            .map(|t| t.entries.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            let mut table = lock(&table);
            let before = table.entries.len();
            table.entries.retain(|(id, _)| *id != self.id);

            if table.entries.len() == before {
                // Being notified right now
                table.dropped.insert(self.id);
            }
        }
    }
}
