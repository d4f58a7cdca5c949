//! The content model: everything the renderer is asked to draw.
//!
//! Every field is optional. Upstream extraction is messy by nature, so the
//! deserializers are deliberately lenient: numeric fields accept numbers or
//! numeric strings and fall back to safe defaults, and the historical
//! price/line_total/unit_price field variants are reconciled into a single
//! `price` here, once, so the block renderers never see the mess.

use serde::Deserialize;
use serde_json::Value;

/// One side of the two-column address header.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: Option<String>,
    /// Postal address, newline- or comma-separated.
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreparedBy {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferenceInfo {
    #[serde(alias = "reference_number", alias = "purchase_order_number")]
    pub reference: Option<String>,
    pub document_type: Option<String>,
    #[serde(alias = "quote_expiry_date")]
    pub expiry: Option<String>,
}

/// One row of the itemized table, reconciled from the raw payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawLineItem")]
pub struct LineItem {
    /// Container or category label, the first table line.
    pub container: Option<String>,
    /// Longer description; when present alongside `container` the row gets
    /// the taller two-line variant.
    pub description: Option<String>,
    /// Movement / service-type label.
    pub movement: Option<String>,
    pub quantity: f64,
    pub price: f64,
    /// Synthetic rows (e.g. a flat statutory fee) suppress the quantity.
    pub injected: bool,
}

impl LineItem {
    /// Two-line rows need both a container label and a description; an
    /// empty string does not count as present.
    pub fn is_two_line(&self) -> bool {
        self.container.is_some() && self.description.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLineItem {
    #[serde(alias = "category")]
    container: Option<String>,
    description: Option<String>,
    #[serde(alias = "service_type")]
    movement: Option<String>,
    quantity: Option<Value>,
    price: Option<Value>,
    line_total: Option<Value>,
    unit_price: Option<Value>,
    #[serde(alias = "synthetic")]
    injected: bool,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        let quantity = coerce_number(raw.quantity.as_ref())
            .filter(|q| *q >= 1.0)
            .unwrap_or(1.0);
        let price = coerce_number(raw.price.as_ref())
            .or_else(|| coerce_number(raw.line_total.as_ref()))
            .or_else(|| coerce_number(raw.unit_price.as_ref()))
            .unwrap_or(0.0);
        LineItem {
            container: clean_text(raw.container),
            description: clean_text(raw.description),
            movement: clean_text(raw.movement),
            quantity,
            price,
            injected: raw.injected,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionRow {
    pub label: String,
    /// May contain embedded newlines; each resulting line is re-wrapped
    /// against the value column. Missing renders as an em-dash.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    pub rows: Vec<SectionRow>,
}

/// The complete content model for one render call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Quote {
    #[serde(alias = "job_name")]
    pub title: Option<String>,
    pub bill_to: Option<Party>,
    pub from: Option<Party>,
    pub prepared_by: Option<PreparedBy>,
    #[serde(alias = "reference_info")]
    pub reference: ReferenceInfo,
    pub line_items: Vec<LineItem>,
    pub sections: Vec<Section>,
    pub notes: Option<String>,
    /// Logo source: data URL, http(s) URL or local path. Prefer passing
    /// resolved bytes to `render` instead; this is the best-effort fallback.
    pub logo: Option<String>,
    /// Contact line drawn centred in the page footer.
    pub footer: Option<String>,
}

/// Accept numbers or numeric strings (tolerating `£` and thousands commas);
/// anything else is None.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != '£' && *c != ',')
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    }
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(v: serde_json::Value) -> LineItem {
        serde_json::from_value(v).expect("line item")
    }

    #[test]
    fn price_prefers_explicit_then_line_total_then_unit_price() {
        let it = item(json!({ "price": 12.5, "line_total": 99.0, "unit_price": 1.0 }));
        assert_eq!(it.price, 12.5);
        let it = item(json!({ "line_total": 99.0, "unit_price": 1.0 }));
        assert_eq!(it.price, 99.0);
        let it = item(json!({ "unit_price": 7.25 }));
        assert_eq!(it.price, 7.25);
    }

    #[test]
    fn unparsable_price_defaults_to_zero() {
        let it = item(json!({ "price": "call for pricing" }));
        assert_eq!(it.price, 0.0);
        let it = item(json!({}));
        assert_eq!(it.price, 0.0);
    }

    #[test]
    fn string_prices_tolerate_currency_formatting() {
        let it = item(json!({ "price": "£1,250.00" }));
        assert_eq!(it.price, 1250.0);
    }

    #[test]
    fn invalid_quantity_defaults_to_one() {
        assert_eq!(item(json!({ "quantity": "many" })).quantity, 1.0);
        assert_eq!(item(json!({ "quantity": 0 })).quantity, 1.0);
        assert_eq!(item(json!({ "quantity": -3 })).quantity, 1.0);
        assert_eq!(item(json!({})).quantity, 1.0);
        assert_eq!(item(json!({ "quantity": "4" })).quantity, 4.0);
    }

    #[test]
    fn empty_strings_do_not_count_as_present() {
        let it = item(json!({ "container": "1100L Bin", "description": "  " }));
        assert!(!it.is_two_line());
        let it = item(json!({ "container": "1100L Bin", "description": "General waste" }));
        assert!(it.is_two_line());
    }

    #[test]
    fn synthetic_alias_marks_injected_rows() {
        let it = item(json!({ "container": "Statutory fee", "synthetic": true }));
        assert!(it.injected);
    }

    #[test]
    fn quote_accepts_historical_field_names() {
        let q: Quote = serde_json::from_value(json!({
            "job_name": "Tube Collection",
            "reference": { "purchase_order_number": "PO-1234" },
            "line_items": [{ "category": "Pallet", "quantity": 2, "line_total": "40" }]
        }))
        .expect("quote");
        assert_eq!(q.title.as_deref(), Some("Tube Collection"));
        assert_eq!(q.reference.reference.as_deref(), Some("PO-1234"));
        assert_eq!(q.line_items[0].price, 40.0);
    }
}
