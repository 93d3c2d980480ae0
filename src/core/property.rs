use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::trace;

/// Receives a tick each time the owning [`Property`] is written. Not
/// `Clone`: every view calls [`Property::subscribe`] for its own stream.
pub struct PropertySubscriber {
    receiver: broadcast::Receiver<()>,
}

impl PropertySubscriber {
    /// Resolves on the next write. `false` once every sender is gone.
    pub async fn wait_for_change(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(()) => return true,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    trace!("Subscriber skipped {} stale notifications", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }

    /// Drains one pending notification without waiting.
    pub fn try_recv(&mut self) -> bool {
        use broadcast::error::TryRecvError;

        matches!(
            self.receiver.try_recv(),
            Ok(()) | Err(TryRecvError::Lagged(_))
        )
    }
}

/// Observable value shared between the controller, its timers and the view.
/// Clones share the same underlying value.
pub struct Property<T: Clone + Send + Sync> {
    watch_sender: Arc<watch::Sender<T>>,
    broadcast_sender: broadcast::Sender<()>,
    name: String,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (watch_sender, _) = watch::channel(initial_value);
        let (broadcast_sender, _) = broadcast::channel(100);
        Self {
            watch_sender: Arc::new(watch_sender),
            broadcast_sender,
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.watch_sender.borrow().clone()
    }

    /// Reads a projection of the value without cloning all of it.
    pub fn read<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.watch_sender.borrow())
    }

    pub fn set(&self, new_value: T) {
        self.watch_sender.send_replace(new_value);
        let _ = self.broadcast_sender.send(());
    }

    /// Mutates the value in place. The closure runs with the value locked,
    /// so check-then-write sequences inside it are not interleaved.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.watch_sender.send_modify(updater);
        let _ = self.broadcast_sender.send(());
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        PropertySubscriber {
            receiver: self.broadcast_sender.subscribe(),
        }
    }

    /// A `watch` receiver for callers that want the latest value rather than
    /// a change stream.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.watch_sender.subscribe()
    }

    pub fn debug_subscribers(&self) -> usize {
        self.broadcast_sender.receiver_count()
    }
}

impl<T: Clone + Send + Sync> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            watch_sender: self.watch_sender.clone(),
            broadcast_sender: self.broadcast_sender.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.name)
    }
}
