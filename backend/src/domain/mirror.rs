//! File mirror records.
//!
//! Mirrors are append-only logs of product save events. Three encodings carry
//! the same fields; the adapters own the byte layout, this module owns the
//! record shape and the format names.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Supported mirror encodings, in import order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorFormat {
    /// `timestamp | name | quantity | price` lines.
    Txt,
    /// Pretty-printed JSON array of objects.
    Json,
    /// Comma-separated rows under a `fecha,nombre,cantidad,precio` header.
    Csv,
}

impl MirrorFormat {
    /// All formats in the order `import_all` visits them.
    pub const ALL: [Self; 3] = [Self::Txt, Self::Json, Self::Csv];

    /// Lower-case format name as used in paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Name written when a save request carries no product name.
    #[must_use]
    pub const fn default_product_name(self) -> &'static str {
        match self {
            Self::Txt => "Producto TXT",
            Self::Json => "Producto JSON",
            Self::Csv => "Producto CSV",
        }
    }
}

impl fmt::Display for MirrorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mirror format: {0}")]
pub struct UnknownMirrorFormat(pub String);

impl FromStr for MirrorFormat {
    type Err = UnknownMirrorFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(UnknownMirrorFormat(other.to_owned())),
        }
    }
}

/// One product save event.
///
/// Values are kept as written; negative quantities or prices are legal in a
/// mirror and only clamped when reconciled into the product store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRecord {
    /// Local time, ISO-8601 to the second without offset.
    pub timestamp: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl MirrorRecord {
    /// Price rendered with exactly two fraction digits.
    ///
    /// # Examples
    /// ```
    /// use inventory_backend::domain::MirrorRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let record = MirrorRecord {
    ///     timestamp: "2024-05-01T12:30:00".into(),
    ///     name: "Pan".into(),
    ///     quantity: 3,
    ///     unit_price: Decimal::new(25, 1),
    /// };
    /// assert_eq!(record.price_2dp(), "2.50");
    /// ```
    #[must_use]
    pub fn price_2dp(&self) -> String {
        let mut price = self.unit_price.round_dp(2);
        price.rescale(2);
        price.to_string()
    }
}

/// Values of a save request after lenient parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl MirrorEntry {
    /// Quantity used when the request carries none or an unparsable one.
    pub const DEFAULT_QUANTITY: i64 = 1;
    /// Price used when the request carries none or an unparsable one.
    pub const DEFAULT_PRICE: Decimal = Decimal::ONE;

    /// Parse raw query values, substituting defaults instead of failing.
    ///
    /// Prices accept a comma as the decimal separator.
    ///
    /// # Examples
    /// ```
    /// use inventory_backend::domain::{MirrorEntry, MirrorFormat};
    /// use rust_decimal::Decimal;
    ///
    /// let entry = MirrorEntry::lenient(MirrorFormat::Csv, None, Some("x"), Some("4,2"));
    /// assert_eq!(entry.name, "Producto CSV");
    /// assert_eq!(entry.quantity, 1);
    /// assert_eq!(entry.unit_price, Decimal::new(42, 1));
    /// ```
    #[must_use]
    pub fn lenient(
        format: MirrorFormat,
        name: Option<&str>,
        quantity: Option<&str>,
        unit_price: Option<&str>,
    ) -> Self {
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(format.default_product_name())
            .to_owned();
        let quantity = quantity
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(Self::DEFAULT_QUANTITY);
        let unit_price = unit_price
            .and_then(|raw| parse_decimal(raw))
            .unwrap_or(Self::DEFAULT_PRICE);
        Self {
            name,
            quantity,
            unit_price,
        }
    }

    /// Stamp the entry with its save time.
    #[must_use]
    pub fn into_record(self, timestamp: String) -> MirrorRecord {
        MirrorRecord {
            timestamp,
            name: self.name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Parse a decimal that may use a comma as separator.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.trim().replace(',', ".").parse::<Decimal>().ok()
}

/// Result of a lenient mirror read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReadout {
    /// Well-formed records in file order.
    pub records: Vec<MirrorRecord>,
    /// Entries that could not be parsed.
    pub skipped: usize,
}
