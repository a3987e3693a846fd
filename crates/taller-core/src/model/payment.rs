// ── Payment domain types ──

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// How a payment was settled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    BankTransfer,
    Other(String),
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Cash, Self::CreditCard, Self::BankTransfer];

    pub fn label(&self) -> &str {
        match self {
            Self::Cash => "Efectivo",
            Self::CreditCard => "Tarjeta de Crédito",
            Self::BankTransfer => "Transferencia Bancaria",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        let trimmed = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|known| known.label().to_lowercase() == trimmed)
            .cloned()
            .unwrap_or(Self::Other(s))
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.label().to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: EntityId,
    pub order_id: Option<EntityId>,
    pub amount: f64,
    pub paid_on: Option<NaiveDate>,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_matching_ignores_case() {
        assert_eq!(
            PaymentMethod::from("tarjeta de crédito".to_owned()),
            PaymentMethod::CreditCard
        );
        assert!(!PaymentMethod::from("Cheque".to_owned()).is_known());
    }
}
