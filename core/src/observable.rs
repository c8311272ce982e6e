//! Observable value holder for view-model state.
//!
//! # Design
//! `ObservableState<T>` is a cloneable handle to a shared value plus a list
//! of subscriber callbacks. `set` stores the value and then calls every
//! subscriber synchronously, in registration order, on the caller's thread.
//! Delivering updates onto a UI thread is the subscriber's job.
//!
//! Locks are never held while callbacks run, so a callback may read the
//! state, subscribe, or unsubscribe. Such changes apply from the next `set`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

struct Inner<T> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
}

impl<T: Send> Unsubscribe for Inner<T> {
    fn remove(&self, id: u64) {
        self.subscribers.lock().retain(|(sid, _)| *sid != id);
    }
}

pub struct ObservableState<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ObservableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> ObservableState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(initial),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.lock().clone()
    }

    /// Replace the value and notify every current subscriber.
    pub fn set(&self, value: T) {
        *self.inner.value.lock() = value.clone();
        let subscribers: Vec<Callback<T>> = self
            .inner
            .subscribers
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in subscribers {
            callback(&value);
        }
    }

    /// Call `callback` on every future `set`. The current value is not replayed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().push((id, Arc::new(callback)));
        let owner: Weak<dyn Unsubscribe> = Arc::downgrade(&self.inner) as Weak<dyn Unsubscribe>;
        Subscription {
            id,
            owner: Some(owner),
        }
    }

    /// Like `subscribe`, but first calls `callback` with the current value.
    pub fn subscribe_with_initial<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        callback(&self.get());
        self.subscribe(callback)
    }

    /// Remove a subscription. A no-op if it was already removed or belongs
    /// to another state.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.inner.remove(subscription.id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

impl<T: Default + Clone + Send + 'static> Default for ObservableState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableState")
            .field("value", &*self.inner.value.lock())
            .field("subscribers", &self.inner.subscribers.lock().len())
            .finish()
    }
}

/// Handle returned by `subscribe`. Dropping it removes the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    owner: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    /// Remove the callback now. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.owner.as_ref().and_then(Weak::upgrade) {
            inner.remove(self.id);
        }
    }

    /// Keep the callback registered for as long as the state lives.
    pub fn detach(mut self) {
        self.owner = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
