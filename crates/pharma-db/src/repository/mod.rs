//! # Repository Module
//!
//! Database repository implementations for the Pharma ERP.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.orders().update_profit_margin(&id, margin)                 │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── insert(&self, order)                                              │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_recent(&self, limit)                                         │
//! │  ├── update_profit_margin(&self, id, margin)                           │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`order::OrderRepository`] - Orders and their stored profit margin

pub mod order;
