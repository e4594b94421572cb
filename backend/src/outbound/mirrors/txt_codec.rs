//! Line-delimited mirror encoding: `timestamp | name | quantity | price`.

use rust_decimal::Decimal;

use crate::domain::{MirrorReadout, MirrorRecord};

const SEPARATOR: &str = " | ";

/// Encode one record as a newline-terminated line.
///
/// Separators and line breaks inside the name become spaces so the line
/// always carries four fields.
pub(super) fn encode_line(record: &MirrorRecord) -> String {
    format!(
        "{ts}{SEPARATOR}{name}{SEPARATOR}{qty}{SEPARATOR}{price}\n",
        ts = record.timestamp,
        name = field_safe(&record.name),
        qty = record.quantity,
        price = record.price_2dp(),
    )
}

fn field_safe(name: &str) -> String {
    name.replace(['|', '\r', '\n'], " ")
}

/// Parse every line. Blank lines are ignored; lines without exactly four
/// fields, a name, an integer quantity and a decimal price are skipped.
pub(super) fn parse(contents: &str) -> MirrorReadout {
    let mut readout = MirrorReadout::default();
    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        match parse_line(line) {
            Some(record) => readout.records.push(record),
            None => readout.skipped += 1,
        }
    }
    readout
}

fn parse_line(line: &str) -> Option<MirrorRecord> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let [timestamp, name, quantity, price] = fields.as_slice() else {
        return None;
    };
    if name.is_empty() {
        return None;
    }
    Some(MirrorRecord {
        timestamp: (*timestamp).to_owned(),
        name: (*name).to_owned(),
        quantity: quantity.parse().ok()?,
        unit_price: price.parse::<Decimal>().ok()?,
    })
}
