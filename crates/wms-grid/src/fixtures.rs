//! Built-in datasets
//!
//! The mock invoices shown by the stock and removal tables, and the inventory
//! log entries shown by the log table, each with the grid configuration the
//! dashboard uses for them.

use wms_core::{FieldSpec, Record, Value};

use crate::config::{FilterConfig, GridConfig, RangeBucket};

const INVOICES: &[(&str, &str, &str, &str)] = &[
    ("INV001", "Paid", "$250.00", "Credit Card"),
    ("INV002", "Pending", "$150.00", "PayPal"),
    ("INV003", "Unpaid", "$350.00", "Bank Transfer"),
    ("INV004", "Paid", "$450.00", "Credit Card"),
    ("INV005", "Paid", "$550.00", "PayPal"),
    ("INV006", "Pending", "$200.00", "Bank Transfer"),
    ("INV007", "Unpaid", "$300.00", "Credit Card"),
    ("INV008", "Paid", "$650.00", "Credit Card"),
    ("INV009", "Pending", "$750.00", "PayPal"),
    ("INV010", "Unpaid", "$850.00", "Bank Transfer"),
];

const INVENTORY_LOGS: &[(&str, &str, &str, i64, &str, &str)] = &[
    ("Screw Set", "Materials", "Insertion", 15, "2025-04-01 08:30:00", "2025-04-01 10:45:00"),
    ("Canned Beans", "Food", "Retrieval", 5, "2025-04-02 22:00:00", "2025-04-03 01:15:00"),
    (
        "Cleaning Solution",
        "Chemicals",
        "Insertion",
        10,
        "2025-04-03 09:00:00",
        "2025-04-03 12:30:00",
    ),
    ("USB Cable", "Electronics", "Retrieval", 8, "2025-04-04 14:00:00", "2025-04-04 15:45:00"),
    ("Pain Killers", "Medicine", "Insertion", 20, "2025-04-05 10:00:00", "2025-04-05 16:30:00"),
    ("Paper Towels", "Household", "Retrieval", 18, "2025-04-06 08:00:00", "2025-04-06 17:00:00"),
    ("Wire Spool", "Materials", "Retrieval", 3, "2025-04-07 13:00:00", "2025-04-07 14:30:00"),
    ("Bottled Water", "Food", "Insertion", 12, "2025-04-08 05:00:00", "2025-04-08 05:30:00"),
    ("Bleach", "Chemicals", "Retrieval", 1, "2025-04-09 20:00:00", "2025-04-10 04:00:00"),
    ("Keyboard", "Electronics", "Insertion", 6, "2025-04-10 09:00:00", "2025-04-10 17:00:00"),
    ("Bandages", "Medicine", "Retrieval", 9, "2025-04-11 11:00:00", "2025-04-11 12:00:00"),
    ("Trash Bags", "Household", "Insertion", 14, "2025-04-12 09:30:00", "2025-04-12 10:15:00"),
];

/// The ten mock invoices `INV001`..`INV010`
pub fn invoices() -> Vec<Record> {
    INVOICES
        .iter()
        .map(|(invoice, status, amount, method)| {
            Record::new()
                .with("invoice", *invoice)
                .with("paymentStatus", *status)
                .with("totalAmount", Value::currency(*amount))
                .with("paymentMethod", *method)
        })
        .collect()
}

/// Invoice grid: keyed by invoice number, amount bands on the total
pub fn invoice_config() -> GridConfig {
    GridConfig::new(
        vec![
            FieldSpec::text("invoice").with_label("Invoice"),
            FieldSpec::text("paymentStatus").with_label("Status"),
            FieldSpec::currency("totalAmount").with_label("Amount"),
            FieldSpec::text("paymentMethod").with_label("Method"),
        ],
        "invoice",
    )
    .with_filter(FilterConfig::categorical("paymentStatus"))
    .with_filter(FilterConfig::categorical("paymentMethod"))
    .with_filter(FilterConfig::range(
        "totalAmount",
        vec![
            RangeBucket::new("under200", 0.0, 200.0).below(),
            RangeBucket::new("200to500", 200.0, 500.0),
            RangeBucket::new("over500", 500.0, f64::MAX).above(),
        ],
    ))
}

/// The twelve inventory log entries
pub fn inventory_logs() -> Vec<Record> {
    INVENTORY_LOGS
        .iter()
        .map(|(item, category, operation, quantity, started, ended)| {
            Record::new()
                .with("item", *item)
                .with("category", *category)
                .with("operation", *operation)
                .with("quantity", *quantity)
                .with("started", Value::date(*started))
                .with("ended", Value::date(*ended))
        })
        .collect()
}

/// Inventory log grid: keyed by item and start time, quantity buckets
pub fn inventory_log_config() -> GridConfig {
    GridConfig::new(
        vec![
            FieldSpec::text("item").with_label("Item"),
            FieldSpec::text("category").with_label("Category"),
            FieldSpec::text("operation").with_label("Operation"),
            FieldSpec::numeric("quantity").with_label("Quantity"),
            FieldSpec::date("started").with_label("Started"),
            FieldSpec::date("ended").with_label("Ended"),
        ],
        "item",
    )
    .with_composite_identity(["item", "started"])
    .with_label_field("item")
    .with_filter(FilterConfig::categorical("category"))
    .with_filter(FilterConfig::categorical("operation"))
    .with_filter(FilterConfig::range(
        "quantity",
        vec![
            RangeBucket::new("1-5", 1.0, 5.0),
            RangeBucket::new("6-10", 6.0, 10.0),
            RangeBucket::new("11-20", 11.0, 20.0),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_configs_are_valid() {
        assert!(invoice_config().validate().is_ok());
        assert!(inventory_log_config().validate().is_ok());
    }

    #[test]
    fn test_fixture_sizes() {
        assert_eq!(invoices().len(), 10);
        assert_eq!(inventory_logs().len(), 12);
    }

    #[test]
    fn test_amount_bands_cover_every_amount_once() {
        let config = invoice_config();
        let Some(crate::config::FilterKind::Range { buckets }) = config.filter_kind("totalAmount")
        else {
            panic!("totalAmount has a range filter");
        };
        for amount in [0.0, 199.99, 199.995, 200.0, 350.0, 500.0, 500.005, 850.0] {
            let hits = buckets.iter().filter(|b| b.contains(amount)).count();
            assert_eq!(hits, 1, "{amount} falls in {hits} bands");
        }
    }

    #[test]
    fn test_inventory_log_keys_are_unique() {
        let config = inventory_log_config();
        let logs = inventory_logs();
        let mut keys: Vec<String> = logs.iter().map(|r| config.key_of(r)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), logs.len());
        assert_eq!(config.key_of(&logs[0]), "Screw Set-2025-04-01 08:30:00");
    }
}
