//! Cart item row store.
//!
//! The row store is the remote side of the cart: one row per product per
//! session, addressed by session id and row id. [`CartStore`] captures
//! exactly the operations the cart uses (insert-one, update-one-by-id,
//! delete-one-by-id, delete-all-by-session, select-all-by-session, plus the
//! customer denormalize write) so the session logic can be exercised against
//! an in-memory double in tests.

use rust_decimal::Decimal;
use sqlx::PgPool;

use aurora_goods_core::{CartItem, CartItemId, CustomerInfo, Product, SessionId};

use super::StoreError;

/// Everything the store holds for one session.
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    /// Line items, in insertion order.
    pub items: Vec<CartItem>,
    /// Customer contact details, if any row for the session carries them.
    pub customer_info: Option<CustomerInfo>,
}

/// Remote row store for cart line items.
///
/// The concurrency discipline of the store itself is delegated entirely to
/// the backing service; callers issue one operation at a time per session.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    /// Select all rows for a session.
    async fn fetch_session(&self, session: &SessionId) -> Result<CartSnapshot, StoreError>;

    /// Insert a new row and return the stored line item with its
    /// store-assigned identity.
    async fn insert_item(
        &self,
        session: &SessionId,
        product: &Product,
        quantity: u32,
        customer: Option<&CustomerInfo>,
    ) -> Result<CartItem, StoreError>;

    /// Update the quantity of one row by its identity.
    async fn update_quantity(&self, id: CartItemId, quantity: u32) -> Result<(), StoreError>;

    /// Delete one row by its identity.
    async fn delete_item(&self, id: CartItemId) -> Result<(), StoreError>;

    /// Delete every row for a session.
    async fn clear_session(&self, session: &SessionId) -> Result<(), StoreError>;

    /// Push customer contact details onto every row for a session.
    async fn set_customer_info(
        &self,
        session: &SessionId,
        info: &CustomerInfo,
    ) -> Result<(), StoreError>;
}

/// `PostgreSQL`-backed cart store.
#[derive(Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

/// Raw `cart_items` row as it comes back from `PostgreSQL`.
#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    product_id: aurora_goods_core::ProductId,
    product_name: String,
    product_price: Decimal,
    quantity: i32,
    customer_name: Option<String>,
    customer_phone: Option<String>,
}

impl CartItemRow {
    fn into_item(self) -> Result<CartItem, StoreError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            StoreError::DataCorruption(format!(
                "negative quantity {} in cart row {}",
                self.quantity, self.id
            ))
        })?;

        Ok(CartItem {
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            product_price: self.product_price,
            quantity,
        })
    }

    fn customer_info(&self) -> Option<CustomerInfo> {
        match (&self.customer_name, &self.customer_phone) {
            (Some(name), Some(phone)) => Some(CustomerInfo {
                name: name.clone(),
                phone: phone.clone(),
            }),
            _ => None,
        }
    }
}

impl PgCartStore {
    /// Create a new store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The `quantity` column is an `INTEGER`.
fn quantity_to_db(quantity: u32) -> Result<i32, StoreError> {
    i32::try_from(quantity)
        .map_err(|_| StoreError::DataCorruption(format!("quantity {quantity} out of range")))
}

impl CartStore for PgCartStore {
    async fn fetch_session(&self, session: &SessionId) -> Result<CartSnapshot, StoreError> {
        let rows: Vec<CartItemRow> = sqlx::query_as(
            r"
            SELECT id, product_id, product_name, product_price, quantity,
                   customer_name, customer_phone
            FROM cart_items
            WHERE session_id = $1
            ORDER BY created_at
            ",
        )
        .bind(session.as_str())
        .fetch_all(&self.pool)
        .await?;

        let customer_info = rows.iter().find_map(CartItemRow::customer_info);
        let items = rows
            .into_iter()
            .map(CartItemRow::into_item)
            .collect::<Result<_, _>>()?;

        Ok(CartSnapshot {
            items,
            customer_info,
        })
    }

    async fn insert_item(
        &self,
        session: &SessionId,
        product: &Product,
        quantity: u32,
        customer: Option<&CustomerInfo>,
    ) -> Result<CartItem, StoreError> {
        let id: CartItemId = sqlx::query_scalar(
            r"
            INSERT INTO cart_items
                (session_id, product_id, product_name, product_price, quantity,
                 customer_name, customer_phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(session.as_str())
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(quantity_to_db(quantity)?)
        .bind(customer.map(|c| c.name.as_str()))
        .bind(customer.map(|c| c.phone.as_str()))
        .fetch_one(&self.pool)
        .await?;

        Ok(CartItem {
            id,
            product_id: product.id,
            product_name: product.name.clone(),
            product_price: product.price,
            quantity,
        })
    }

    async fn update_quantity(&self, id: CartItemId, quantity: u32) -> Result<(), StoreError> {
        sqlx::query("UPDATE cart_items SET quantity = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(quantity_to_db(quantity)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_item(&self, id: CartItemId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear_session(&self, session: &SessionId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM cart_items WHERE session_id = $1")
            .bind(session.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_customer_info(
        &self,
        session: &SessionId,
        info: &CustomerInfo,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"
            UPDATE cart_items
            SET customer_name = $2, customer_phone = $3, updated_at = now()
            WHERE session_id = $1
            ",
        )
        .bind(session.as_str())
        .bind(&info.name)
        .bind(&info.phone)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory [`CartStore`] double for unit tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use uuid::Uuid;

    use super::*;

    #[derive(Clone)]
    struct MemoryRow {
        item: CartItem,
        customer: Option<CustomerInfo>,
    }

    /// In-memory cart store with a failure toggle.
    ///
    /// When failing, every operation errors without touching the stored
    /// rows, mimicking a store-side rejection.
    #[derive(Default)]
    pub struct MemoryCartStore {
        rows: Mutex<HashMap<String, Vec<MemoryRow>>>,
        failing: AtomicBool,
    }

    impl MemoryCartStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent operation fail (or succeed again).
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Database(sqlx::Error::PoolClosed));
            }
            Ok(())
        }

        /// Number of rows currently stored for a session.
        pub fn row_count(&self, session: &SessionId) -> usize {
            self.rows
                .lock()
                .expect("store mutex poisoned")
                .get(session.as_str())
                .map_or(0, Vec::len)
        }
    }

    impl CartStore for MemoryCartStore {
        async fn fetch_session(&self, session: &SessionId) -> Result<CartSnapshot, StoreError> {
            self.check_available()?;
            let rows = self.rows.lock().expect("store mutex poisoned");
            let session_rows = rows.get(session.as_str()).cloned().unwrap_or_default();

            Ok(CartSnapshot {
                customer_info: session_rows.iter().find_map(|r| r.customer.clone()),
                items: session_rows.into_iter().map(|r| r.item).collect(),
            })
        }

        async fn insert_item(
            &self,
            session: &SessionId,
            product: &Product,
            quantity: u32,
            customer: Option<&CustomerInfo>,
        ) -> Result<CartItem, StoreError> {
            self.check_available()?;
            let item = CartItem {
                id: CartItemId::new(Uuid::new_v4()),
                product_id: product.id,
                product_name: product.name.clone(),
                product_price: product.price,
                quantity,
            };

            let mut rows = self.rows.lock().expect("store mutex poisoned");
            rows.entry(session.as_str().to_owned())
                .or_default()
                .push(MemoryRow {
                    item: item.clone(),
                    customer: customer.cloned(),
                });
            Ok(item)
        }

        async fn update_quantity(&self, id: CartItemId, quantity: u32) -> Result<(), StoreError> {
            self.check_available()?;
            let mut rows = self.rows.lock().expect("store mutex poisoned");
            for session_rows in rows.values_mut() {
                for row in session_rows.iter_mut() {
                    if row.item.id == id {
                        row.item.quantity = quantity;
                    }
                }
            }
            Ok(())
        }

        async fn delete_item(&self, id: CartItemId) -> Result<(), StoreError> {
            self.check_available()?;
            let mut rows = self.rows.lock().expect("store mutex poisoned");
            for session_rows in rows.values_mut() {
                session_rows.retain(|row| row.item.id != id);
            }
            Ok(())
        }

        async fn clear_session(&self, session: &SessionId) -> Result<(), StoreError> {
            self.check_available()?;
            self.rows
                .lock()
                .expect("store mutex poisoned")
                .remove(session.as_str());
            Ok(())
        }

        async fn set_customer_info(
            &self,
            session: &SessionId,
            info: &CustomerInfo,
        ) -> Result<(), StoreError> {
            self.check_available()?;
            let mut rows = self.rows.lock().expect("store mutex poisoned");
            if let Some(session_rows) = rows.get_mut(session.as_str()) {
                for row in session_rows.iter_mut() {
                    row.customer = Some(info.clone());
                }
            }
            Ok(())
        }
    }
}
