//! Free-text search and categorical filters for list screens
//!
//! A record matches when the lower-cased query is a substring of any of its
//! searchable fields and every active categorical filter agrees. Queries are
//! case-folded but otherwise taken verbatim, so surrounding whitespace is
//! significant. Filtering is a full pass over the slice and keeps input order.

use serde::{Deserialize, Serialize};

use crate::models::{
    CashDirection, CashTransaction, Customer, CustomerStatus, InventoryItem, OrderRecord,
    OrderStatus, PaymentMethod, PaymentStatus, StockStatus, Supplier, SupplierStatus,
    TransactionStatus, Warehouse, WarehouseStatus,
};
use crate::types::DateRange;

/// Records that take part in free-text search
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match over a record's searchable fields
pub fn matches_query<T: Searchable + ?Sized>(query: &str, record: &T) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// A text query combined with categorical constraints
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Records accepted by `filter`, in input order
pub fn apply_filter<'a, T, F>(records: &'a [T], filter: &F) -> Vec<&'a T>
where
    F: RecordFilter<T> + ?Sized,
{
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// `None` is the "all" option
fn allows<V: PartialEq>(wanted: &Option<V>, actual: &V) -> bool {
    wanted.as_ref().map_or(true, |w| w == actual)
}

impl Searchable for InventoryItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.product_name.as_str(), self.variant.as_str(), self.sku.as_str()]
    }
}

impl Searchable for CashTransaction {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str(), self.category.as_str()];
        fields.extend(self.reference.as_deref());
        fields.extend(self.counterparty.as_deref());
        fields
    }
}

impl Searchable for OrderRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.order_number.as_str(), self.customer.as_str(), self.customer_email.as_str()]
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.contact_person.as_str()]
    }
}

impl Searchable for Warehouse {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str(), self.manager.as_str()]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InventoryFilter {
    pub query: String,
    pub warehouse: Option<String>,
    pub variant: Option<String>,
    pub status: Option<StockStatus>,
}

impl RecordFilter<InventoryItem> for InventoryFilter {
    fn matches(&self, item: &InventoryItem) -> bool {
        matches_query(&self.query, item)
            && allows(&self.warehouse, &item.warehouse)
            && allows(&self.variant, &item.variant)
            && allows(&self.status, &item.status())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransactionFilter {
    pub query: String,
    pub direction: Option<CashDirection>,
    pub payment_method: Option<PaymentMethod>,
    pub category: Option<String>,
    pub status: Option<TransactionStatus>,
    pub date_range: Option<DateRange>,
}

impl RecordFilter<CashTransaction> for TransactionFilter {
    fn matches(&self, t: &CashTransaction) -> bool {
        matches_query(&self.query, t)
            && allows(&self.direction, &t.direction)
            && allows(&self.payment_method, &t.payment_method)
            && allows(&self.category, &t.category)
            && allows(&self.status, &t.status)
            && self.date_range.map_or(true, |range| range.contains(t.date))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrderFilter {
    pub query: String,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl RecordFilter<OrderRecord> for OrderFilter {
    fn matches(&self, order: &OrderRecord) -> bool {
        matches_query(&self.query, order)
            && allows(&self.status, &order.status)
            && allows(&self.payment_status, &order.payment_status)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerFilter {
    pub query: String,
    pub status: Option<CustomerStatus>,
}

impl RecordFilter<Customer> for CustomerFilter {
    fn matches(&self, customer: &Customer) -> bool {
        matches_query(&self.query, customer) && allows(&self.status, &customer.status)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SupplierFilter {
    pub query: String,
    pub status: Option<SupplierStatus>,
    pub country: Option<String>,
}

impl RecordFilter<Supplier> for SupplierFilter {
    fn matches(&self, supplier: &Supplier) -> bool {
        matches_query(&self.query, supplier)
            && allows(&self.status, &supplier.status)
            && allows(&self.country, &supplier.country)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WarehouseFilter {
    pub query: String,
    pub status: Option<WarehouseStatus>,
}

impl RecordFilter<Warehouse> for WarehouseFilter {
    fn matches(&self, warehouse: &Warehouse) -> bool {
        matches_query(&self.query, warehouse) && allows(&self.status, &warehouse.status)
    }
}
