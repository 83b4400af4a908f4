//! Order drafts, line items and the pricing calculator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MetricsError, MetricsResult};
use crate::validation::{MAX_AMOUNT, MAX_QUANTITY};

/// Tax and shipping parameters for order pricing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingConfig {
    /// Flat rate applied to the subtotal (0.18 = 18%)
    pub tax_rate: Decimal,
    /// Charged once per non-empty order
    pub shipping_fee: Decimal,
}

impl PricingConfig {
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
    pub const DEFAULT_SHIPPING_FEE: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);

    pub fn new(tax_rate: Decimal, shipping_fee: Decimal) -> MetricsResult<Self> {
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(MetricsError::InvalidRange {
                field: "tax_rate",
                message: format!("{} is outside [0, 1]", tax_rate),
            });
        }
        if shipping_fee < Decimal::ZERO {
            return Err(MetricsError::negative("shipping_fee", shipping_fee));
        }
        if shipping_fee > MAX_AMOUNT {
            return Err(MetricsError::InvalidRange {
                field: "shipping_fee",
                message: format!("{} exceeds {}", shipping_fee, MAX_AMOUNT),
            });
        }
        Ok(Self {
            tax_rate,
            shipping_fee,
        })
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            shipping_fee: Self::DEFAULT_SHIPPING_FEE,
        }
    }
}

/// Order-level discount, always within `[0, 100]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    pub const ZERO: DiscountPercent = DiscountPercent(Decimal::ZERO);

    /// Reject values outside `[0, 100]`
    pub fn new(percent: Decimal) -> MetricsResult<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(MetricsError::InvalidRange {
                field: "discount_percent",
                message: format!("{} is outside [0, 100]", percent),
            });
        }
        Ok(Self(percent))
    }

    /// Clamp raw form input into `[0, 100]`
    pub fn clamped(percent: Decimal) -> Self {
        Self(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = MetricsError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        DiscountPercent::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}

/// One product-quantity-price entry on an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl OrderLineItem {
    /// Derived on every read, never stored
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Derived order figures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Price an order from scratch.
///
/// `total = subtotal + tax + shipping - discount`; tax and discount are both
/// taken from the undiscounted subtotal, and an empty order pays neither tax
/// nor shipping.
pub fn calculate_order_totals(
    items: &[OrderLineItem],
    discount: DiscountPercent,
    config: &PricingConfig,
) -> OrderTotals {
    let subtotal: Decimal = items.iter().map(OrderLineItem::line_total).sum();
    let tax = subtotal * config.tax_rate;
    let shipping = if subtotal > Decimal::ZERO {
        config.shipping_fee
    } else {
        Decimal::ZERO
    };
    let discount = subtotal * discount.value() / Decimal::ONE_HUNDRED;
    let total = subtotal + tax + shipping - discount;

    OrderTotals {
        subtotal,
        tax,
        shipping,
        discount,
        total,
    }
}

/// An order being built on the create-order screen.
///
/// Totals are private and rebuilt after every mutation, so the draft is
/// serialize-only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderDraft {
    pub customer_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    items: Vec<OrderLineItem>,
    discount: DiscountPercent,
    pricing: PricingConfig,
    totals: OrderTotals,
}

impl OrderDraft {
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            customer_id: None,
            due_date: None,
            notes: None,
            items: Vec::new(),
            discount: DiscountPercent::ZERO,
            pricing,
            totals: calculate_order_totals(&[], DiscountPercent::ZERO, &pricing),
        }
    }

    /// Rebuild a draft from submitted lines, validating each one
    pub fn from_items(
        pricing: PricingConfig,
        items: Vec<OrderLineItem>,
        discount: DiscountPercent,
    ) -> MetricsResult<Self> {
        let mut draft = Self::new(pricing);
        for item in items {
            crate::validation::validate_line_item(&item)?;
            if draft.items.iter().any(|i| i.product_id == item.product_id) {
                return Err(MetricsError::DuplicateLineItem(item.product_id));
            }
            draft.items.push(item);
        }
        draft.discount = discount;
        draft.recalculate();
        Ok(draft)
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    /// Add a product at quantity 1; each product may appear once
    pub fn add_product(
        &mut self,
        product_id: Uuid,
        product_name: impl Into<String>,
        unit_price: Decimal,
    ) -> MetricsResult<&OrderLineItem> {
        if self.items.iter().any(|i| i.product_id == product_id) {
            return Err(MetricsError::DuplicateLineItem(product_id));
        }
        if unit_price < Decimal::ZERO {
            return Err(MetricsError::negative("unit_price", unit_price));
        }
        check_unit_price(unit_price)?;
        self.items.push(OrderLineItem {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity: 1,
        });
        self.recalculate();
        Ok(&self.items[self.items.len() - 1])
    }

    /// Set a quantity; anything below 1 is raised to 1 rather than removing the line
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) -> MetricsResult<()> {
        if quantity > MAX_QUANTITY {
            return Err(MetricsError::InvalidRange {
                field: "quantity",
                message: format!("{} exceeds {} units", quantity, MAX_QUANTITY),
            });
        }
        self.line_mut(product_id)?.quantity = quantity.max(1);
        self.recalculate();
        Ok(())
    }

    /// Set a unit price; negative input is raised to 0
    pub fn update_unit_price(&mut self, product_id: Uuid, unit_price: Decimal) -> MetricsResult<()> {
        check_unit_price(unit_price)?;
        self.line_mut(product_id)?.unit_price = unit_price.max(Decimal::ZERO);
        self.recalculate();
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: Uuid) -> MetricsResult<OrderLineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or(MetricsError::LineItemNotFound(product_id))?;
        let removed = self.items.remove(index);
        self.recalculate();
        Ok(removed)
    }

    pub fn set_discount(&mut self, discount: DiscountPercent) {
        self.discount = discount;
        self.recalculate();
    }

    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal per unit, zero for an empty order
    pub fn average_unit_price(&self) -> Decimal {
        average_unit_price(&self.items)
    }

    /// Customer, at least one line and a due date
    pub fn can_submit(&self) -> bool {
        self.customer_id.is_some() && !self.items.is_empty() && self.due_date.is_some()
    }

    fn line_mut(&mut self, product_id: Uuid) -> MetricsResult<&mut OrderLineItem> {
        self.items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(MetricsError::LineItemNotFound(product_id))
    }

    fn recalculate(&mut self) {
        self.totals = calculate_order_totals(&self.items, self.discount, &self.pricing);
    }
}

fn check_unit_price(unit_price: Decimal) -> MetricsResult<()> {
    if unit_price > MAX_AMOUNT {
        return Err(MetricsError::InvalidRange {
            field: "unit_price",
            message: format!("{} exceeds {}", unit_price, MAX_AMOUNT),
        });
    }
    Ok(())
}

/// Subtotal divided by total units, zero when there are no units
pub fn average_unit_price(items: &[OrderLineItem]) -> Decimal {
    let units: i64 = items.iter().map(|i| i.quantity).sum();
    if units == 0 {
        return Decimal::ZERO;
    }
    let subtotal: Decimal = items.iter().map(OrderLineItem::line_total).sum();
    subtotal / Decimal::from(units)
}

/// Fulfilment state of a placed order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

/// Row in the orders list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub order_number: String,
    pub customer: String,
    pub customer_email: String,
    pub items: i64,
    pub quantity: i64,
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub order_date: NaiveDate,
    pub due_date: NaiveDate,
}
