//! In-process fan-out of newly recorded detections.
//!
//! Subscribers are expected to re-run their rollup when notified; the feed
//! itself keeps no history.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use revisent_core::DetectionEvent;

type Callback = Arc<dyn Fn(&DetectionEvent) + Send + Sync>;

#[derive(Default)]
struct FeedInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Callback)>>,
}

impl FeedInner {
    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Callback)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone, Default)]
pub struct DetectionFeed {
    inner: Arc<FeedInner>,
}

impl DetectionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&DetectionEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers().push((id, Arc::new(callback)));
        Subscription {
            feed: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Delivers `event` to every live subscriber and returns how many were
    /// notified. Callbacks run outside the registry lock.
    pub fn publish(&self, event: &DetectionEvent) -> usize {
        let callbacks: Vec<Callback> = self
            .inner
            .subscribers()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    feed: Weak<FeedInner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.feed.upgrade() {
            inner.subscribers().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::AtomicUsize;

    fn detection(id: &str) -> DetectionEvent {
        DetectionEvent {
            id: id.to_string(),
            timestamp: Utc::now(),
            category: "recycle".to_string(),
            item_name: None,
            device_id: "st-1".to_string(),
        }
    }

    #[test]
    fn publish_reaches_live_subscribers_only() {
        let feed = DetectionFeed::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let subscription = feed.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(feed.publish(&detection("a")), 1);
        subscription.unsubscribe();
        assert_eq!(feed.publish(&detection("b")), 0);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_subscribers() {
        let feed = DetectionFeed::new();
        let clone = feed.clone();
        let ids = Arc::new(Mutex::new(Vec::new()));
        let sink = ids.clone();
        let _subscription = feed.subscribe(move |event| {
            sink.lock().expect("lock").push(event.id.clone());
        });

        clone.publish(&detection("x"));

        assert_eq!(*ids.lock().expect("lock"), vec!["x".to_string()]);
    }

    #[test]
    fn callbacks_may_subscribe_without_deadlocking() {
        let feed = DetectionFeed::new();
        let inner_feed = feed.clone();
        let nested = Arc::new(Mutex::new(Vec::new()));
        let keep = nested.clone();
        let _subscription = feed.subscribe(move |_| {
            let subscription = inner_feed.subscribe(|_| {});
            keep.lock().expect("lock").push(subscription);
        });

        feed.publish(&detection("a"));

        assert_eq!(feed.subscriber_count(), 2);
    }
}
