//! # Cart Store
//!
//! The per-session owner of the cart.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action                Store Method              Effect              │
//! │  ─────────                ────────────              ──────              │
//! │                                                                         │
//! │  "Add to bag" ──────────► add_to_cart() ──────────► merge or append    │
//! │                                                                         │
//! │  Quantity stepper ──────► update_quantity() ──────► set (<= 0 removes) │
//! │                                                                         │
//! │  Remove link ───────────► remove_from_cart() ─────► drop line          │
//! │                                                                         │
//! │  Empty bag / checkout ──► clear_cart() ───────────► items = []         │
//! │                                                                         │
//! │  Every effective change: recount → save record → notify subscribers    │
//! │  No-ops (absent id, rejected input) touch neither storage nor          │
//! │  subscribers.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of the mutation methods return errors. Rejected input and storage
//! failures are logged; the in-memory cart stays authoritative.

use lumiere_core::{Cart, CartItem, CartSnapshot, Money, NewCartItem, ProductId, CART_STORAGE_KEY};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::record;
use crate::storage::{validate_key, CartStorage};

/// Cart state plus its persisted mirror.
///
/// ## Lifecycle
/// Created once per session with [`CartStore::new`] or [`CartStore::open`],
/// which load any stored record. Mutated only through the four cart
/// operations. Wrap it in a [`CartHandle`](crate::CartHandle) to share it.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
    /// False when `key` is unusable; the cart then lives in memory only.
    persistent: bool,
    changes: watch::Sender<CartSnapshot>,
}

impl<S: CartStorage> CartStore<S> {
    /// Opens the store on the well-known `cart-storage` key.
    pub fn new(storage: S) -> Self {
        Self::open(storage, CART_STORAGE_KEY)
    }

    /// Opens the store on `key`, restoring the record stored there if any.
    ///
    /// A missing, unreadable or incompatible record yields an empty cart.
    /// An invalid key is logged once and the store runs without persistence.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let persistent = match validate_key(&key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "Invalid cart key, changes will not be persisted");
                false
            }
        };

        let cart = if persistent {
            load_cart(&storage, &key)
        } else {
            Cart::new()
        };

        info!(
            key = %key,
            lines = cart.line_count(),
            item_count = cart.item_count(),
            "Cart store opened"
        );

        let (changes, _) = watch::channel(cart.snapshot());
        CartStore {
            cart,
            storage,
            key,
            persistent,
            changes,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of `item`, merging with an existing line.
    ///
    /// Quantities <= 0 and invalid items are ignored (logged at `warn`).
    pub fn add_to_cart(&mut self, item: NewCartItem, quantity: i64) {
        let id = item.id;
        debug!(product_id = %id, quantity, "add_to_cart");

        match self.cart.add_item(item, quantity) {
            Ok(()) => self.commit(),
            Err(e) => warn!(product_id = %id, quantity, error = %e, "Ignoring add_to_cart"),
        }
    }

    /// Removes the line for `id`; absent ids are a no-op.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        debug!(product_id = %id, "remove_from_cart");

        if self.cart.remove_item(id) {
            self.commit();
        }
    }

    /// Sets the quantity of `id`. `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        debug!(product_id = %id, quantity, "update_quantity");

        if self.cart.update_quantity(id, quantity) {
            self.commit();
        }
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        debug!(lines = self.cart.line_count(), "clear_cart");

        self.cart.clear();
        self.commit();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.cart.get(id)
    }

    pub fn quantity_of(&self, id: ProductId) -> i64 {
        self.cart.quantity_of(id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Storage key this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether effective changes are written to storage.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Receiver that always holds the latest snapshot.
    ///
    /// Marked changed after every effective mutation. Usable with
    /// `borrow()` from synchronous code or `changed().await` from async code.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.changes.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Gives back the storage backend, dropping the in-memory state.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self) {
        self.persist();
        self.changes.send_replace(self.cart.snapshot());
    }

    /// Best effort: a failed write is logged and otherwise ignored.
    fn persist(&mut self) {
        if !self.persistent {
            return;
        }

        let result = record::encode(&self.cart).and_then(|raw| self.storage.save(&self.key, &raw));

        match result {
            Ok(()) => debug!(
                key = %self.key,
                item_count = self.cart.item_count(),
                "Cart persisted"
            ),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist cart"),
        }
    }
}

fn load_cart<S: CartStorage>(storage: &S, key: &str) -> Cart {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored cart");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    record::decode(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "Discarding unreadable cart record");
        Cart::new()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn item(id: i64, name: &str, cents: i64) -> NewCartItem {
        NewCartItem::new(
            ProductId::new(id),
            name,
            Money::from_cents(cents),
            format!("/images/{}.jpg", id),
        )
    }

    /// Storage that counts writes and can be told to fail.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail: bool,
        saves: usize,
    }

    impl CartStorage for FlakyStorage {
        fn load(&self, key: &str) -> StorageResult<Option<String>> {
            if self.fail {
                return Err(StorageError::invalid_key(key, "storage offline"));
            }
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
            self.saves += 1;
            if self.fail {
                return Err(StorageError::invalid_key(key, "storage offline"));
            }
            self.inner.save(key, value)
        }

        fn remove(&mut self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_worked_example() {
        let mut store = CartStore::new(MemoryStorage::new());
        let a = item(1, "A", 1000);

        store.add_to_cart(a.clone(), 2);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.item_count(), 2);

        store.add_to_cart(a, 3);
        assert_eq!(store.quantity_of(ProductId::new(1)), 5);
        assert_eq!(store.item_count(), 5);

        store.update_quantity(ProductId::new(1), 1);
        assert_eq!(store.quantity_of(ProductId::new(1)), 1);
        assert_eq!(store.item_count(), 1);

        store.remove_from_cart(ProductId::new(1));
        assert!(store.items().is_empty());
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_update_non_positive_matches_remove() {
        for quantity in [0, -5] {
            let mut updated = CartStore::new(MemoryStorage::new());
            let mut removed = CartStore::new(MemoryStorage::new());
            for store in [&mut updated, &mut removed] {
                store.add_to_cart(item(1, "Toner", 1800), 2);
                store.add_to_cart(item(2, "Cleanser", 1500), 1);
            }

            updated.update_quantity(ProductId::new(1), quantity);
            removed.remove_from_cart(ProductId::new(1));

            assert_eq!(updated.snapshot(), removed.snapshot());
        }
    }

    #[test]
    fn test_clear_cart() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(item(1, "Toner", 1800), 2);
        store.add_to_cart(item(2, "Cleanser", 1500), 4);

        store.clear_cart();
        assert_eq!(store.snapshot(), CartSnapshot::default());
    }

    #[test]
    fn test_reopen_restores_persisted_state() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.add_to_cart(item(1, "Toner", 1800), 2);
        store.add_to_cart(item(2, "Cleanser", 1500), 1);
        let expected = store.snapshot();

        let reopened = CartStore::new(store.into_storage());
        assert_eq!(reopened.snapshot(), expected);
        assert_eq!(reopened.subtotal().cents(), 5100);
    }

    #[test]
    fn test_keys_are_isolated() {
        let mut store = CartStore::open(MemoryStorage::new(), "guest-cart");
        store.add_to_cart(item(1, "Toner", 1800), 2);

        let other = CartStore::open(store.into_storage(), "member-cart");
        assert!(other.is_empty());
        assert_eq!(other.key(), "member-cart");
    }

    #[test]
    fn test_corrupt_record_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage.save(CART_STORAGE_KEY, "{ definitely not json").unwrap();

        let store = CartStore::new(storage);
        assert!(store.is_empty());
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_failing_storage_does_not_block_mutations() {
        let storage = FlakyStorage {
            fail: true,
            ..Default::default()
        };
        let mut store = CartStore::new(storage);

        store.add_to_cart(item(1, "Toner", 1800), 2);
        store.update_quantity(ProductId::new(1), 3);
        assert_eq!(store.item_count(), 3);
        assert_eq!(store.storage().saves, 2);

        store.clear_cart();
        assert!(store.is_empty());
    }

    #[test]
    fn test_noops_do_not_write() {
        let mut store = CartStore::new(FlakyStorage::default());
        store.add_to_cart(item(1, "Toner", 1800), 1);
        assert_eq!(store.storage().saves, 1);

        store.remove_from_cart(ProductId::new(42));
        store.update_quantity(ProductId::new(42), 3);
        store.update_quantity(ProductId::new(1), 1);
        store.add_to_cart(item(2, "Serum", 2400), 0);
        store.add_to_cart(item(3, "Mask", -2400), 1);

        assert_eq!(store.storage().saves, 1);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_add_accepts_unusual_names_and_images() {
        let mut store = CartStore::new(MemoryStorage::new());
        let price = Money::from_cents(1000);
        let data_uri = format!("data:image/png;base64,{}", "A".repeat(4000));

        store.add_to_cart(NewCartItem::new(ProductId::new(1), "", price, "x"), 2);
        store.add_to_cart(NewCartItem::new(ProductId::new(2), "N".repeat(201), price, "x"), 2);
        store.add_to_cart(NewCartItem::new(ProductId::new(3), "Serum", price, data_uri), 2);
        store.add_to_cart(
            NewCartItem::new(ProductId::new(4), "Serum", price, "/img/rose lip.jpg"),
            2,
        );

        assert_eq!(store.items().len(), 4);
        assert_eq!(store.item_count(), 8);

        let reopened = CartStore::new(store.into_storage());
        assert_eq!(reopened.item_count(), 8);
    }

    #[test]
    fn test_invalid_key_keeps_cart_in_memory() {
        let mut storage = FlakyStorage::default();
        storage.inner.save("../escape", "{ not a record").unwrap();

        let mut store = CartStore::open(storage, "../escape");
        assert!(!store.is_persistent());
        assert!(store.is_empty());

        store.add_to_cart(item(1, "Toner", 1800), 2);
        store.clear_cart();
        store.add_to_cart(item(2, "Serum", 2400), 1);

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.storage().saves, 0);
        assert!(CartStore::new(MemoryStorage::new()).is_persistent());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut store = CartStore::new(MemoryStorage::new());
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_to_cart(item(1, "Toner", 1800), 2);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().item_count, 2);

        store.remove_from_cart(ProductId::new(99));
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let mut store = CartStore::new(MemoryStorage::new());
        let mut rx = store.subscribe();

        let waiter = tokio::spawn(async move {
            rx.changed().await.unwrap();
            rx.borrow().item_count
        });

        store.add_to_cart(item(1, "Toner", 1800), 4);
        assert_eq!(waiter.await.unwrap(), 4);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(i64, i64),
        Remove(i64),
        Update(i64, i64),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0i64..6, -2i64..10).prop_map(|(id, q)| Op::Add(id, q)),
            2 => (0i64..6).prop_map(Op::Remove),
            2 => (0i64..6, -2i64..10).prop_map(|(id, q)| Op::Update(id, q)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_reopen_restores_last_state(ops in prop::collection::vec(op(), 0..40)) {
            let mut store = CartStore::new(MemoryStorage::new());
            let mut rx = store.subscribe();

            for op in ops {
                match op {
                    Op::Add(id, q) => store.add_to_cart(item(id, "Shade", 500 + id), q),
                    Op::Remove(id) => store.remove_from_cart(ProductId::new(id)),
                    Op::Update(id, q) => store.update_quantity(ProductId::new(id), q),
                    Op::Clear => store.clear_cart(),
                }
            }

            let expected = store.snapshot();
            let sum: i64 = expected.items.iter().map(|i| i.quantity).sum();
            prop_assert_eq!(expected.item_count, sum);
            prop_assert!(expected.items.iter().all(|i| i.quantity > 0));
            prop_assert_eq!(&*rx.borrow_and_update(), &expected);

            let reopened = CartStore::new(store.into_storage());
            prop_assert_eq!(reopened.snapshot(), expected);
        }
    }
}
