//! # Repository Module
//!
//! ```text
//! CheckoutOrchestrator
//!      │  repository.save(new_order)          (OrderRepository trait)
//!      ▼
//! SqliteOrderRepository
//!  ├── insert(&self, new_order)   → Order with assigned id
//!  ├── get_by_id(&self, id)       → Option<Order>
//!  └── count(&self)
//!      │  SQL
//!      ▼
//! SQLite `orders` table
//! ```

pub mod order;
