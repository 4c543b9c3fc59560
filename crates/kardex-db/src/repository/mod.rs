//! # Repository Module
//!
//! Read-only repositories over the report's nine collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Database                                                              │
//! │  ├── sales()            → SaleRepository                               │
//! │  │                         ├── list()        sales                      │
//! │  │                         └── list_lines()  sale_product ⟕ barcodes    │
//! │  ├── transfers()        → TransferRepository                           │
//! │  │                         ├── list()        transfers                  │
//! │  │                         └── list_lines()  transfer_product ⟕ barcodes│
//! │  ├── purchase_orders()  → PurchaseOrderRepository                      │
//! │  │                         ├── list()        purchase_orders            │
//! │  │                         └── list_items()  purchase_order_items       │
//! │  └── catalog()          → CatalogRepository                            │
//! │                            ├── products()                               │
//! │                            ├── stores()                                 │
//! │                            └── employees()                              │
//! │                                                                         │
//! │  Every query casts ids and timestamps to text at the store, so the     │
//! │  Rust side decodes one stable shape whatever the column types are.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod purchase_order;
pub mod sale;
pub mod transfer;
