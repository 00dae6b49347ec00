//! Cart commands.
//!
//! Each command maps onto one store operation. Mutations never fail from the
//! caller's point of view; only `evict` touches storage directly and can
//! surface a [`StorageError`].

use lumiere_cart::{CartStorage, CartStore, StorageError};
use lumiere_core::{CartSnapshot, Money, NewCartItem, ProductId};
use tracing::info;

use crate::Command;

/// Runs `command` against `store` and returns the cart it leaves behind.
pub fn execute<S: CartStorage>(
    mut store: CartStore<S>,
    command: Command,
) -> Result<CartSnapshot, StorageError> {
    match command {
        Command::Show => {}
        Command::Add {
            id,
            name,
            price,
            image,
            quantity,
        } => add(&mut store, id, name, price, image, quantity),
        Command::Remove { id } => store.remove_from_cart(ProductId::new(id)),
        Command::Update { id, quantity } => store.update_quantity(ProductId::new(id), quantity),
        Command::Clear => store.clear_cart(),
        Command::Evict => return evict(store),
    }

    Ok(store.snapshot())
}

fn add<S: CartStorage>(
    store: &mut CartStore<S>,
    id: i64,
    name: String,
    price: Money,
    image: String,
    quantity: i64,
) {
    let item = NewCartItem::new(ProductId::new(id), name, price, image);
    store.add_to_cart(item, quantity);
}

/// Deletes the persisted record. The store is consumed; the next open
/// starts from an empty cart.
fn evict<S: CartStorage>(store: CartStore<S>) -> Result<CartSnapshot, StorageError> {
    let key = store.key().to_string();
    let mut storage = store.into_storage();
    storage.remove(&key)?;

    info!(key = %key, "Evicted persisted cart");
    Ok(CartSnapshot::default())
}
