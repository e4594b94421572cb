//! Tabular mirror encoding under a `fecha,nombre,cantidad,precio` header.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::domain::{MirrorReadout, MirrorRecord, parse_decimal};

const HEADER: [&str; 4] = ["fecha", "nombre", "cantidad", "precio"];

/// Encode one record as CSV, preceded by the header when `with_header`.
pub(super) fn encode(record: &MirrorRecord, with_header: bool) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if with_header {
        writer.write_record(HEADER)?;
    }
    let quantity = record.quantity.to_string();
    let price = record.price_2dp();
    writer.write_record([
        record.timestamp.as_str(),
        record.name.as_str(),
        quantity.as_str(),
        price.as_str(),
    ])?;
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Column positions resolved from the header row.
struct Columns {
    fecha: usize,
    nombre: usize,
    cantidad: usize,
    precio: usize,
}

impl Columns {
    fn resolve(header: &StringRecord) -> Option<Self> {
        let position = |name: &str| header.iter().position(|column| column == name);
        Some(Self {
            fecha: position("fecha")?,
            nombre: position("nombre")?,
            cantidad: position("cantidad")?,
            precio: position("precio")?,
        })
    }

    fn decode(&self, row: &StringRecord) -> Option<MirrorRecord> {
        let name = row.get(self.nombre)?;
        if name.is_empty() {
            return None;
        }
        Some(MirrorRecord {
            timestamp: row.get(self.fecha)?.to_owned(),
            name: name.to_owned(),
            quantity: row.get(self.cantidad)?.parse().ok()?,
            unit_price: parse_decimal(row.get(self.precio)?)?,
        })
    }
}

/// Parse every row under the header. A header lacking any expected column
/// makes the whole file unreadable; individual bad rows are skipped.
pub(super) fn parse(contents: &[u8]) -> Option<MirrorReadout> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(contents);
    let header = reader.headers().ok()?.clone();
    if header.is_empty() {
        return Some(MirrorReadout::default());
    }
    let columns = Columns::resolve(&header)?;
    let mut readout = MirrorReadout::default();
    for row in reader.records() {
        match row.ok().and_then(|row| columns.decode(&row)) {
            Some(record) => readout.records.push(record),
            None => readout.skipped += 1,
        }
    }
    Some(readout)
}
