//! [`Attribute`] – a named, remotely observable property.
//!
//! The service implementation sets the attribute; subscribers receive an
//! [`AttributeUpdate`] per set.  Uses [`tokio::sync::broadcast`] under the
//! hood so every subscriber sees every update without any single subscriber
//! blocking the others.
//!
//! Unlike a transient event channel, an attribute caches its latest value:
//! setting it with zero subscribers is a normal condition (the value is
//! stored and `set` reports 0 notified), and a late subscriber can read the
//! current value with [`Attribute::get`] before the next update arrives.

use std::sync::{Arc, RwLock};

use carinfo_types::AttributeUpdate;
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// Default per-attribute channel capacity (number of buffered updates before
/// old ones are dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 64;

struct AttributeInner<T> {
    name: String,
    latest: RwLock<Option<T>>,
    sender: broadcast::Sender<AttributeUpdate<T>>,
}

/// Shared observable property.  Clone it cheaply – all clones share the same
/// cached value and subscriber channel.
pub struct Attribute<T> {
    inner: Arc<AttributeInner<T>>,
}

impl<T> Clone for Attribute<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Attribute<T> {
    /// Create an attribute with the default update-buffer capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, DEFAULT_CAPACITY)
    }

    /// Create an attribute with an explicit update-buffer capacity.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(AttributeInner {
                name: name.into(),
                latest: RwLock::new(None),
                sender,
            }),
        }
    }

    /// The attribute's name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Store `value` as the new latest value and notify subscribers.
    ///
    /// Returns the number of subscribers that were handed the update.
    /// Returns 0 when nobody is currently subscribed; the value is cached
    /// either way.
    pub fn set(&self, value: T) -> usize {
        *self
            .inner
            .latest
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(value.clone());

        let update = AttributeUpdate {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            value,
        };
        let notified = self.inner.sender.send(update).unwrap_or(0);
        trace!(attribute = %self.inner.name, notified, "attribute set");
        notified
    }

    /// The most recently set value, or `None` before the first set.
    pub fn get(&self) -> Option<T> {
        self.inner
            .latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Subscribe to future updates.  The subscription only yields updates
    /// set after this call; use [`Attribute::get`] for the current value.
    pub fn subscribe(&self) -> AttributeSubscription<T> {
        AttributeSubscription {
            receiver: self.inner.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

/// An async receiver of [`AttributeUpdate`] values for one attribute.
///
/// Obtained via [`Attribute::subscribe`].
pub struct AttributeSubscription<T> {
    receiver: broadcast::Receiver<AttributeUpdate<T>>,
}

impl<T: Clone> AttributeSubscription<T> {
    /// Wait for the next update.
    ///
    /// Returns:
    /// * `Ok(update)` – a successfully received update.
    /// * `Err(broadcast::error::RecvError::Lagged(n))` – the subscriber fell
    ///   behind and `n` updates were dropped.  The caller decides whether to
    ///   continue or abort.
    /// * `Err(broadcast::error::RecvError::Closed)` – every handle to the
    ///   attribute has been dropped.
    pub async fn recv(&mut self) -> Result<AttributeUpdate<T>, broadcast::error::RecvError> {
        self.receiver.recv().await
    }
}
