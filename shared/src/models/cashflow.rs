//! Cash transactions and the financial aggregator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MetricsError, MetricsResult};

/// Money received
pub const INFLOW_CATEGORIES: &[&str] = &[
    "Sales Revenue",
    "Other Income",
    "Investment Income",
    "Refunds",
];

/// Money spent
pub const OUTFLOW_CATEGORIES: &[&str] = &[
    "Inventory Purchase",
    "Operating Expenses",
    "Marketing",
    "Transportation",
    "Utilities",
    "Equipment",
    "Salaries",
    "Rent",
    "Other Expenses",
];

/// A single cash movement through one payment channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashTransaction {
    pub id: Uuid,
    pub direction: CashDirection,
    /// Always non-negative; the direction carries the sign
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub reference: Option<String>,
    /// Customer for inflows, vendor for outflows
    #[serde(default)]
    pub counterparty: Option<String>,
    pub status: TransactionStatus,
}

impl CashTransaction {
    /// Amount with the direction's sign applied
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            CashDirection::Inflow => self.amount,
            CashDirection::Outflow => -self.amount,
        }
    }

    /// Move to a new status, refusing to reopen completed records
    pub fn transition(&mut self, to: TransactionStatus) -> MetricsResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(MetricsError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CashDirection {
    Inflow,
    Outflow,
}

impl CashDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashDirection::Inflow => "inflow",
            CashDirection::Outflow => "outflow",
        }
    }

    /// Categories a transaction in this direction may use
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            CashDirection::Inflow => INFLOW_CATEGORIES,
            CashDirection::Outflow => OUTFLOW_CATEGORIES,
        }
    }

    pub fn allows_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}

/// Payment channels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "momo")]
    MobileMoney,
    #[serde(rename = "bank")]
    Bank,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::MobileMoney,
        PaymentMethod::Bank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::MobileMoney => "momo",
            PaymentMethod::Bank => "bank",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::MobileMoney => write!(f, "Mobile Money"),
            PaymentMethod::Bank => write!(f, "Bank Transfer"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Completed is terminal; pending may fail; both pending and failed may complete
    pub fn can_transition_to(&self, to: TransactionStatus) -> bool {
        matches!(
            (self, to),
            (TransactionStatus::Pending, TransactionStatus::Completed)
                | (TransactionStatus::Pending, TransactionStatus::Failed)
                | (TransactionStatus::Failed, TransactionStatus::Completed)
        )
    }
}

/// Sign classification of net cashflow. Zero counts as positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CashflowTrend {
    Positive,
    Negative,
}

impl CashflowTrend {
    pub fn of(net: Decimal) -> Self {
        if net >= Decimal::ZERO {
            CashflowTrend::Positive
        } else {
            CashflowTrend::Negative
        }
    }
}

/// Sum of amounts travelling in one direction
pub fn total_by_direction(transactions: &[CashTransaction], direction: CashDirection) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.direction == direction)
        .map(|t| t.amount)
        .sum()
}

/// Total inflow minus total outflow
pub fn net_cashflow(transactions: &[CashTransaction]) -> Decimal {
    total_by_direction(transactions, CashDirection::Inflow)
        - total_by_direction(transactions, CashDirection::Outflow)
}

/// Signed net of the transactions that went through one channel.
///
/// This is the net of the supplied window only; it is not reconciled against
/// an opening balance. See [`ChannelBalances::with_opening`].
pub fn balance_by_payment_method(transactions: &[CashTransaction], method: PaymentMethod) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.payment_method == method)
        .map(CashTransaction::signed_amount)
        .sum()
}

/// Unsigned total of one direction through one channel
pub fn total_by_method(
    transactions: &[CashTransaction],
    direction: CashDirection,
    method: PaymentMethod,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.direction == direction && t.payment_method == method)
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Amount per category, in order of each category's first appearance.
///
/// The result is not sorted; callers needing a stable display order sort it.
pub fn total_by_category(transactions: &[CashTransaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for t in transactions {
        match totals.iter_mut().find(|c| c.category == t.category) {
            Some(existing) => existing.amount += t.amount,
            None => totals.push(CategoryTotal {
                category: t.category.clone(),
                amount: t.amount,
            }),
        }
    }
    totals
}

/// Per-channel balances
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChannelBalances {
    pub cash: Decimal,
    pub mobile_money: Decimal,
    pub bank: Decimal,
}

impl ChannelBalances {
    pub fn from_transactions(transactions: &[CashTransaction]) -> Self {
        Self {
            cash: balance_by_payment_method(transactions, PaymentMethod::Cash),
            mobile_money: balance_by_payment_method(transactions, PaymentMethod::MobileMoney),
            bank: balance_by_payment_method(transactions, PaymentMethod::Bank),
        }
    }

    /// Shift each channel by an explicit opening balance
    pub fn with_opening(self, opening: ChannelBalances) -> Self {
        Self {
            cash: self.cash + opening.cash,
            mobile_money: self.mobile_money + opening.mobile_money,
            bank: self.bank + opening.bank,
        }
    }

    pub fn get(&self, method: PaymentMethod) -> Decimal {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::MobileMoney => self.mobile_money,
            PaymentMethod::Bank => self.bank,
        }
    }

    pub fn total(&self) -> Decimal {
        self.cash + self.mobile_money + self.bank
    }
}

/// Everything the cashflow screens show above the transaction table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashflowSummary {
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    pub net_cashflow: Decimal,
    pub trend: CashflowTrend,
    pub balances: ChannelBalances,
    pub inflow_by_category: Vec<CategoryTotal>,
    pub outflow_by_category: Vec<CategoryTotal>,
    pub transaction_count: usize,
}

impl CashflowSummary {
    pub fn from_transactions(transactions: &[CashTransaction]) -> Self {
        let total_inflow = total_by_direction(transactions, CashDirection::Inflow);
        let total_outflow = total_by_direction(transactions, CashDirection::Outflow);
        let net = total_inflow - total_outflow;

        let (inflows, outflows): (Vec<CashTransaction>, Vec<CashTransaction>) = transactions
            .iter()
            .cloned()
            .partition(|t| t.direction == CashDirection::Inflow);

        Self {
            total_inflow,
            total_outflow,
            net_cashflow: net,
            trend: CashflowTrend::of(net),
            balances: ChannelBalances::from_transactions(transactions),
            inflow_by_category: total_by_category(&inflows),
            outflow_by_category: total_by_category(&outflows),
            transaction_count: transactions.len(),
        }
    }

    pub fn with_opening_balances(mut self, opening: ChannelBalances) -> Self {
        self.balances = self.balances.with_opening(opening);
        self
    }
}
