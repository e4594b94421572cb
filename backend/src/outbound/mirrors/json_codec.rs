//! JSON mirror encoding: a pretty-printed array of
//! `{ "fecha", "nombre", "cantidad", "precio" }` objects.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value, json};

use crate::domain::{MirrorReadout, MirrorRecord};

/// Parse the stored array leniently.
///
/// Anything that is not a JSON array yields `None`; callers treat that as an
/// empty mirror.
pub(super) fn parse_array(contents: &str) -> Option<Vec<Value>> {
    if contents.trim().is_empty() {
        return Some(Vec::new());
    }
    match serde_json::from_str::<Value>(contents).ok()? {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Decode the array elements into records, counting unusable elements.
pub(super) fn decode(items: &[Value]) -> MirrorReadout {
    let mut readout = MirrorReadout::default();
    for item in items {
        match item.as_object().and_then(decode_object) {
            Some(record) => readout.records.push(record),
            None => readout.skipped += 1,
        }
    }
    readout
}

/// Encode one record as a JSON object.
pub(super) fn encode(record: &MirrorRecord) -> Value {
    let price = Decimal::from_str(&record.price_2dp())
        .ok()
        .and_then(|price| price.to_f64())
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(record.price_2dp()), Value::Number);
    json!({
        "fecha": record.timestamp,
        "nombre": record.name,
        "cantidad": record.quantity,
        "precio": price,
    })
}

/// Render the whole array with two-space indentation.
pub(super) fn render(items: &[Value]) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(items)?;
    rendered.push('\n');
    Ok(rendered)
}

fn decode_object(object: &Map<String, Value>) -> Option<MirrorRecord> {
    let name = object.get("nombre")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let timestamp = object
        .get("fecha")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(MirrorRecord {
        timestamp: timestamp.to_owned(),
        name: name.to_owned(),
        quantity: decode_quantity(object.get("cantidad")?)?,
        unit_price: decode_price(object.get("precio")?)?,
    })
}

fn decode_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn decode_price(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().replace(',', "."),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
