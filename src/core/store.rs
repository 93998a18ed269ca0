use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

/// A record stored in a [`Table`]. Ids are positive and unique per table.
pub trait Record {
    fn id(&self) -> i64;
}

/// In-memory table owning its rows exclusively.
///
/// Ids come from an atomic sequence, so interleaved inserts always receive
/// distinct, monotonically increasing ids; an id is never reused after a
/// delete. Reads hand out copies of the rows, never references into the
/// table.
pub struct Table<T> {
    rows: RwLock<Vec<T>>,
    seq: AtomicI64,
}

impl<T: Record + Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            seq: AtomicI64::new(1),
        }
    }

    /// Build a table from seed rows, continuing the id sequence after the
    /// highest seeded id.
    pub fn seeded(rows: Vec<T>) -> Self {
        let next = rows.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            seq: AtomicI64::new(next),
        }
    }

    /// Copy of all rows in insertion order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn find(&self, id: i64) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.rows.read().await.iter().any(|r| r.id() == id)
    }

    pub async fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.rows.read().await.iter().any(|r| pred(r))
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Insert a new row built from the next sequence id. Returns a copy.
    pub async fn insert(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.seq.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.write().await.push(row.clone());
        row
    }

    /// Apply a partial mutation to the row with the given id. Returns the
    /// updated copy, or None if the id is absent.
    pub async fn update(&self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        apply(row);
        Some(row.clone())
    }

    /// Remove the row with the given id. Returns false if it was absent.
    pub async fn remove(&self, id: i64) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        rows.len() < before
    }

    /// Remove every row matching the predicate. Returns the removed count.
    pub async fn remove_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| !pred(r));
        before - rows.len()
    }
}

impl<T: Record + Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    impl Record for Row {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, name: &str) -> Row {
        Row {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let table = Table::new();
        let a = table
            .insert(|id| row(id, "a"))
            .await;
        let b = table
            .insert(|id| row(id, "b"))
            .await;
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let table = Table::seeded(vec![row(1, "a"), row(2, "b")]);
        assert!(table.remove(2).await);
        let c = table.insert(|id| row(id, "c")).await;
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn interleaved_inserts_get_distinct_ids() {
        let table = std::sync::Arc::new(Table::new());
        let t1 = {
            let table = table.clone();
            tokio::spawn(async move { table.insert(|id| row(id, "x")).await.id })
        };
        let t2 = {
            let table = table.clone();
            tokio::spawn(async move { table.insert(|id| row(id, "y")).await.id })
        };
        let (a, b) = (t1.await.unwrap(), t2.await.unwrap());
        assert_ne!(a, b);
        assert_eq!(table.len().await, 2);
    }

    #[tokio::test]
    async fn snapshot_is_a_copy() {
        let table = Table::seeded(vec![row(1, "a")]);
        let mut snap = table.snapshot().await;
        snap[0].name = "mutated".to_string();
        assert_eq!(table.find(1).await.unwrap().name, "a");
    }

    #[tokio::test]
    async fn remove_missing_id_is_a_noop() {
        let table = Table::seeded(vec![row(1, "a")]);
        assert!(!table.remove(99).await);
        assert_eq!(table.len().await, 1);
    }
}
