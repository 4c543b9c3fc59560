//! Totals of sales and purchase orders, in centavos.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales.total_sale / purchase_orders.total_amount   (NUMERIC, store)    │
//! │        │                                                                │
//! │        ▼  ROUND(x * 100)::bigint  in the query                          │
//! │  Money(i64)                                          (report side)      │
//! │        │                                                                │
//! │        ▼  Display                                                       │
//! │  "150.50"   ──►  labels append " Bs." where a currency is shown         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The report only ever prints totals, so the type is display-oriented:
//! no arithmetic, no currency field.
//!
//! ```rust
//! use kardex_core::money::Money;
//!
//! assert_eq!(Money::from_cents(15050).to_string(), "150.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// An exact amount in centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }
}

/// Two decimals, no symbol: `150.50`, `0.05`, `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
