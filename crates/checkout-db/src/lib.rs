//! # checkout-db: SQLite Order Storage
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Data Flow                               │
//! │                                                                         │
//! │  CheckoutOrchestrator::process_checkout                                │
//! │       │  (approved charge)                                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   checkout-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────┐  ┌───────────┐ │   │
//! │  │   │   Database    │    │   Repositories      │  │Migrations │ │   │
//! │  │   │   (pool.rs)   │◄───│ SqliteOrderRepo     │  │ (embedded)│ │   │
//! │  │   │  SqlitePool   │    │ impl OrderRepository│  │001_orders │ │   │
//! │  │   └───────────────┘    └─────────────────────┘  └───────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (path from checkout.toml)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("orders.db")).await?;
//! let orchestrator = CheckoutOrchestrator::new(gateway, Arc::new(db.orders()), notifier);
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::order::SqliteOrderRepository;
