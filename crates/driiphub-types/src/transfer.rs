//! Transfer legs exchanged with the reserve fund.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Currency;

/// One leg of a reserve transfer: an amount in a single currency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferTx {
    /// The currency moved by this leg.
    pub currency: Currency,
    /// The amount moved by this leg.
    pub amount: Decimal,
}

impl TransferTx {
    #[must_use]
    pub fn new(currency: Currency, amount: Decimal) -> Self {
        Self { currency, amount }
    }
}

impl std::fmt::Display for TransferTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_tx_display() {
        let tx = TransferTx::new(Currency::NATIVE, Decimal::new(5, 0));
        assert_eq!(format!("{tx}"), "5 native");
    }

    #[test]
    fn transfer_tx_serde_roundtrip() {
        let tx = TransferTx::new(Currency::NATIVE, Decimal::new(125, 1));
        let json = serde_json::to_string(&tx).unwrap();
        let back: TransferTx = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }
}
