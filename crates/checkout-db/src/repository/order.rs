//! # Order Repository
//!
//! Stores checkout orders and hands out their identifiers.
//!
//! ## Row Layout
//! ```text
//! orders
//! ├── id           INTEGER PK AUTOINCREMENT  → OrderId (never reused)
//! ├── user_id      TEXT                      → cart.user.id (indexed)
//! ├── user_email   TEXT
//! ├── total_cents  INTEGER                   → Order.total (as charged)
//! ├── status       TEXT                      → OrderStatus
//! ├── cart_json    TEXT                      → full Cart snapshot
//! └── created_at   TEXT (RFC 3339, UTC)
//! ```
//!
//! `user_id`, `user_email` and `total_cents` duplicate parts of the snapshot
//! so they can be queried without decoding JSON.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use checkout_core::{Cart, Money, NewOrder, Order, OrderId, OrderStatus};
use checkout_service::{CollaboratorError, OrderRepository};

use crate::error::{DbError, DbResult};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteOrderRepository { pool }
    }

    /// Inserts an order and returns it with the id SQLite assigned.
    pub async fn insert(&self, order: NewOrder) -> DbResult<Order> {
        let cart_json = serde_json::to_string(&order.cart)?;
        let user = order.cart.user();

        debug!(user_id = %user.id(), total = %order.total, "Inserting order");

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                user_id, user_email, total_cents, status, cart_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user.id())
        .bind(user.email())
        .bind(order.total.cents())
        .bind(order.status.as_str())
        .bind(&cart_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        let id = OrderId::new(result.last_insert_rowid());
        debug!(order_id = %id, "Order inserted");

        Ok(order.into_order(id))
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: OrderId) -> DbResult<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, total_cents, status, cart_json
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| -> DbResult<Order> {
            let status: String = row.try_get("status")?;
            let status = status
                .parse::<OrderStatus>()
                .map_err(|e| DbError::corrupt("orders", e.to_string()))?;
            let cart_json: String = row.try_get("cart_json")?;
            let cart: Cart = serde_json::from_str(&cart_json)?;

            Ok(Order {
                id: OrderId::new(row.try_get("id")?),
                cart,
                total: Money::from_cents(row.try_get("total_cents")?),
                status,
            })
        })
        .transpose()
    }

    /// Number of stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Number of orders placed by a user.
    pub async fn count_for_user(&self, user_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn save(&self, order: NewOrder) -> Result<Order, CollaboratorError> {
        Ok(self.insert(order).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use checkout_core::{Item, MembershipTier, User};

    async fn repository() -> (Database, SqliteOrderRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orders = db.orders();
        (db, orders)
    }

    fn premium_order() -> NewOrder {
        let user = User::new("2", "Premium Customer", "premium@example.com", MembershipTier::Premium);
        let items = vec![
            Item::new("Expensive Item 1", Money::from_cents(10000)).unwrap(),
            Item::new("Expensive Item 2", Money::from_cents(10000)).unwrap(),
        ];
        NewOrder::processed(Cart::new(user, items), Money::from_cents(18000))
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let (_db, orders) = repository().await;

        let first = orders.insert(premium_order()).await.unwrap();
        let second = orders.insert(premium_order()).await.unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(orders.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id_round_trips_the_snapshot() {
        let (_db, orders) = repository().await;
        let new_order = premium_order();

        let saved = orders.insert(new_order.clone()).await.unwrap();
        let loaded = orders.get_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.cart, new_order.cart);
        assert_eq!(loaded.total.cents(), 18000);
        assert_eq!(loaded.status, OrderStatus::Processed);
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let (_db, orders) = repository().await;
        assert!(orders.get_by_id(OrderId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_for_user() {
        let (_db, orders) = repository().await;
        orders.insert(premium_order()).await.unwrap();

        assert_eq!(orders.count_for_user("2").await.unwrap(), 1);
        assert_eq!(orders.count_for_user("1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_negative_total_is_rejected() {
        let (_db, orders) = repository().await;
        let mut order = premium_order();
        order.total = Money::from_cents(-1);

        let err = orders.save(order).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_save_after_close_is_a_collaborator_fault() {
        let (db, orders) = repository().await;
        db.close().await;

        let err = orders.save(premium_order()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Unavailable(_)));
    }
}
