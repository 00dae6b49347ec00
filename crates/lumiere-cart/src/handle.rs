//! # Cart Handle
//!
//! Shared access to one [`CartStore`].
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several owners (page, header, drawer) hold the same session cart
//! 2. Only one of them should mutate it at a time
//! 3. Mutations run in call order; last write wins for `update_quantity`
//!
//! A poisoned lock is recovered: the store's state is always consistent
//! between operations, so a panic elsewhere does not invalidate it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lumiere_core::{CartSnapshot, NewCartItem, ProductId};
use tokio::sync::watch;
use tracing::warn;

use crate::storage::CartStorage;
use crate::store::CartStore;

/// Cloneable context object around a session's [`CartStore`].
#[derive(Debug)]
pub struct CartHandle<S> {
    store: Arc<Mutex<CartStore<S>>>,
}

impl<S> Clone for CartHandle<S> {
    fn clone(&self) -> Self {
        CartHandle {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CartStorage> CartHandle<S> {
    pub fn new(store: CartStore<S>) -> Self {
        CartHandle {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// # use lumiere_cart::{CartHandle, CartStore, MemoryStorage};
    /// let handle = CartHandle::new(CartStore::new(MemoryStorage::new()));
    /// let badge = handle.with_cart(|store| store.item_count());
    /// assert_eq!(badge, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore<S>) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore<S>) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    pub fn add_to_cart(&self, item: NewCartItem, quantity: i64) {
        self.with_cart_mut(|store| store.add_to_cart(item, quantity));
    }

    pub fn remove_from_cart(&self, id: ProductId) {
        self.with_cart_mut(|store| store.remove_from_cart(id));
    }

    pub fn update_quantity(&self, id: ProductId, quantity: i64) {
        self.with_cart_mut(|store| store.update_quantity(id, quantity));
    }

    pub fn clear_cart(&self) {
        self.with_cart_mut(CartStore::clear_cart);
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(CartStore::snapshot)
    }

    pub fn item_count(&self) -> i64 {
        self.with_cart(CartStore::item_count)
    }

    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.with_cart(CartStore::subscribe)
    }

    fn lock(&self) -> MutexGuard<'_, CartStore<S>> {
        self.store.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Cart lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
