//! Client-visible values that change before the durable layer confirms.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::Result;

/// A value published as immutable snapshots to any number of subscribers.
///
/// Mutations take `&mut self`, so there is one writer at a time. A mutation
/// publishes its optimistic value at once and restores the previous snapshot
/// if the durable write fails; subscribers never keep seeing a value that was
/// not committed.
pub struct Optimistic<T> {
    tx: watch::Sender<Arc<T>>,
}

impl<T> Optimistic<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(Arc::new(value));
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.tx.subscribe()
    }

    /// The snapshot subscribers currently see.
    pub fn current(&self) -> Arc<T> {
        Arc::clone(&self.tx.borrow())
    }

    /// Publishes `value` as is. Used for loads from the durable layer.
    pub fn replace(&mut self, value: T) {
        self.tx.send_replace(Arc::new(value));
    }

    /// Publishes a modified copy of the current snapshot.
    pub fn modify(&mut self, f: impl FnOnce(&mut T)) {
        let mut next = (*self.current()).clone();
        f(&mut next);
        self.replace(next);
    }

    /// Publishes `apply` at once, then waits for `write`.
    ///
    /// On failure the snapshot from before `apply` is published again and
    /// the error returned.
    pub async fn mutate<R, F>(
        &mut self,
        operation: &'static str,
        apply: impl FnOnce(&mut T),
        write: F,
    ) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        self.mutate_settle(operation, apply, write, |_, _| {}).await
    }

    /// Like [`mutate`](Self::mutate), and on success lets `settle` swap the
    /// optimistic value for the authoritative one.
    pub async fn mutate_settle<R, F>(
        &mut self,
        operation: &'static str,
        apply: impl FnOnce(&mut T),
        write: F,
        settle: impl FnOnce(&mut T, &R),
    ) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        let previous = self.current();
        self.modify(apply);

        match write.await {
            Ok(result) => {
                self.modify(|value| settle(value, &result));
                tracing::debug!(operation, "Optimistic change committed");
                Ok(result)
            }
            Err(error) => {
                self.tx.send_replace(previous);
                tracing::warn!(operation, error = %error, "Durable write failed, change rolled back");
                Err(error)
            }
        }
    }
}

impl<T> Default for Optimistic<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
