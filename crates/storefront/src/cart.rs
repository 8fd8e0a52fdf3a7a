//! Cart session logic.
//!
//! A [`CartSession`] holds the line items and customer details for one
//! browsing session and mirrors every mutation to the row store, one store
//! call per operation. The UI dispatches cart operations sequentially, so
//! no two operations for the same session race each other and no locking or
//! version check is attempted here.
//!
//! # Failure semantics
//!
//! A failed store call is logged and the operation abandoned; the in-memory
//! list is left unchanged. There is no retry and no rollback beyond "don't
//! apply the change", so local and remote state can drift silently after a
//! failure. That trade-off is acceptable for a cart; nothing durable hangs
//! off it.

use rust_decimal::Decimal;

use aurora_goods_core::{CartItem, CustomerInfo, Product, ProductId, SessionId};

use crate::db::{CartSnapshot, CartStore};

/// The cart for one browsing session.
///
/// Constructed with the store handle it mirrors to; there is no way to
/// obtain a `CartSession` without one.
pub struct CartSession<'a, S: CartStore> {
    store: &'a S,
    session_id: SessionId,
    items: Vec<CartItem>,
    customer_info: Option<CustomerInfo>,
}

impl<'a, S: CartStore> CartSession<'a, S> {
    /// Create an empty session without touching the store.
    pub const fn new(store: &'a S, session_id: SessionId) -> Self {
        Self {
            store,
            session_id,
            items: Vec::new(),
            customer_info: None,
        }
    }

    /// Load a session from the store.
    ///
    /// A fetch failure is logged and an empty cart returned; the rows are
    /// still there and will show up on the next successful load.
    pub async fn load(store: &'a S, session_id: SessionId) -> Self {
        let mut session = Self::new(store, session_id);

        match store.fetch_session(&session.session_id).await {
            Ok(CartSnapshot {
                items,
                customer_info,
            }) => {
                session.items = items;
                session.customer_info = customer_info;
            }
            Err(e) => {
                tracing::error!(session_id = %session.session_id, error = %e, "failed to load cart");
            }
        }

        session
    }

    /// The session this cart belongs to.
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Current line items.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Customer details, if supplied.
    pub const fn customer_info(&self) -> Option<&CustomerInfo> {
        self.customer_info.as_ref()
    }

    /// Add one unit of a product to the cart.
    ///
    /// If the product is already in the cart this bumps its quantity by one
    /// rather than creating a second line item. Otherwise a new row is
    /// inserted, carrying the current customer details if present, and the
    /// stored record (with its store-assigned id) is appended locally.
    pub async fn add(&mut self, product: &Product) {
        if let Some(existing) = self.items.iter().find(|i| i.product_id == product.id) {
            let quantity = existing.quantity + 1;
            self.set_quantity(product.id, quantity).await;
            return;
        }

        match self
            .store
            .insert_item(&self.session_id, product, 1, self.customer_info.as_ref())
            .await
        {
            Ok(item) => self.items.push(item),
            Err(e) => {
                tracing::error!(
                    session_id = %self.session_id,
                    product_id = %product.id,
                    error = %e,
                    "failed to add item to cart"
                );
            }
        }
    }

    /// Remove a product's line item entirely.
    ///
    /// No-op if the product is not in the cart.
    pub async fn remove(&mut self, product_id: ProductId) {
        let Some(item) = self.items.iter().find(|i| i.product_id == product_id) else {
            return;
        };

        match self.store.delete_item(item.id).await {
            Ok(()) => self.items.retain(|i| i.product_id != product_id),
            Err(e) => {
                tracing::error!(
                    session_id = %self.session_id,
                    product_id = %product_id,
                    error = %e,
                    "failed to remove item from cart"
                );
            }
        }
    }

    /// Set the quantity of a product's line item.
    ///
    /// A quantity of zero removes the line item. No-op if the product is
    /// not in the cart.
    pub async fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id).await;
            return;
        }

        let Some(item) = self.items.iter().find(|i| i.product_id == product_id) else {
            return;
        };

        match self.store.update_quantity(item.id, quantity).await {
            Ok(()) => {
                for item in &mut self.items {
                    if item.product_id == product_id {
                        item.quantity = quantity;
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    session_id = %self.session_id,
                    product_id = %product_id,
                    error = %e,
                    "failed to update cart quantity"
                );
            }
        }
    }

    /// Empty the cart, deleting every row for the session.
    pub async fn clear(&mut self) {
        match self.store.clear_session(&self.session_id).await {
            Ok(()) => self.items.clear(),
            Err(e) => {
                tracing::error!(session_id = %self.session_id, error = %e, "failed to clear cart");
            }
        }
    }

    /// Record customer details and push them onto every row for the session.
    ///
    /// The details are kept locally even if the push fails, matching the
    /// checkout flow: the customer typed them in, and future rows will carry
    /// them on insert.
    pub async fn set_customer_info(&mut self, info: CustomerInfo) {
        self.customer_info = Some(info.clone());

        if let Err(e) = self.store.set_customer_info(&self.session_id, &info).await {
            tracing::error!(
                session_id = %self.session_id,
                error = %e,
                "failed to push customer info onto cart rows"
            );
        }
    }

    /// Sum of `unit price * quantity` over the line items.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over the line items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::cart_items::memory::MemoryCartStore;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Decimal::from(price),
        }
    }

    fn session() -> SessionId {
        SessionId::generate()
    }

    #[tokio::test]
    async fn add_same_product_twice_merges_into_one_line() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, session());
        let pen = product(1, "Pen", 10);

        cart.add(&pen).await;
        cart.add(&pen).await;

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_price(), Decimal::from(20));
        assert_eq!(cart.item_count(), 2);
        // The store must hold one row, not two
        assert_eq!(store.row_count(cart.session_id()), 1);
    }

    #[tokio::test]
    async fn counts_and_totals_follow_mutations() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, session());

        cart.add(&product(1, "Pen", 10)).await;
        cart.add(&product(2, "Notebook", 25)).await;
        cart.set_quantity(ProductId::new(2), 3).await;

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total_price(), Decimal::from(10 + 3 * 25));

        cart.remove(ProductId::new(1)).await;
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_price(), Decimal::from(75));
    }

    #[tokio::test]
    async fn set_quantity_zero_removes_the_line() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, session());

        cart.add(&product(1, "Pen", 10)).await;
        cart.set_quantity(ProductId::new(1), 0).await;

        assert!(cart.items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(store.row_count(cart.session_id()), 0);
    }

    #[tokio::test]
    async fn set_quantity_for_absent_product_is_a_noop() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, session());

        cart.set_quantity(ProductId::new(99), 5).await;
        cart.remove(ProductId::new(99)).await;

        assert!(cart.items().is_empty());
    }

    #[tokio::test]
    async fn clear_empties_local_and_remote_state() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, session());

        cart.add(&product(1, "Pen", 10)).await;
        cart.add(&product(2, "Notebook", 25)).await;
        cart.clear().await;

        assert!(cart.items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(store.row_count(cart.session_id()), 0);
    }

    #[tokio::test]
    async fn store_failure_leaves_local_state_unchanged() {
        let store = MemoryCartStore::new();
        let mut cart = CartSession::new(&store, session());
        cart.add(&product(1, "Pen", 10)).await;

        store.set_failing(true);
        cart.add(&product(2, "Notebook", 25)).await;
        cart.set_quantity(ProductId::new(1), 7).await;
        cart.remove(ProductId::new(1)).await;
        cart.clear().await;

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total_price(), Decimal::from(10));

        store.set_failing(false);
        cart.set_quantity(ProductId::new(1), 7).await;
        assert_eq!(cart.item_count(), 7);
    }

    #[tokio::test]
    async fn load_restores_items_and_customer_info() {
        let store = MemoryCartStore::new();
        let session_id = session();

        let mut cart = CartSession::new(&store, session_id.clone());
        cart.add(&product(1, "Pen", 10)).await;
        cart.add(&product(1, "Pen", 10)).await;
        cart.set_customer_info(CustomerInfo {
            name: "Ada".to_owned(),
            phone: "+1 555 0100".to_owned(),
        })
        .await;

        let reloaded = CartSession::load(&store, session_id).await;
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.customer_info().unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn load_failure_yields_empty_cart() {
        let store = MemoryCartStore::new();
        let session_id = session();

        let mut cart = CartSession::new(&store, session_id.clone());
        cart.add(&product(1, "Pen", 10)).await;

        store.set_failing(true);
        let reloaded = CartSession::load(&store, session_id).await;
        assert!(reloaded.items().is_empty());
        assert!(reloaded.customer_info().is_none());
    }

    #[tokio::test]
    async fn customer_info_carries_onto_new_rows() {
        let store = MemoryCartStore::new();
        let session_id = session();

        let mut cart = CartSession::new(&store, session_id.clone());
        cart.set_customer_info(CustomerInfo {
            name: "Ada".to_owned(),
            phone: "+1 555 0100".to_owned(),
        })
        .await;
        cart.add(&product(1, "Pen", 10)).await;

        let reloaded = CartSession::load(&store, session_id).await;
        assert_eq!(reloaded.customer_info().unwrap().phone, "+1 555 0100");
    }
}
