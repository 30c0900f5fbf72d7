use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the order being taxed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category: String,
}

impl OrderItem {
    /// Extended price of this line (`unit_price × quantity`).
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Shipping destination used for region matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub state: String,
    pub city: String,
    pub postal_code: String,
}

/// Everything the engine needs to compute tax for one order.
///
/// The engine trusts `subtotal` as provided by the checkout flow; it never
/// recomputes it from `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub items: Vec<OrderItem>,
    pub destination: Destination,

    /// Caller identity, used only for logging.
    pub requester: Option<String>,
}
