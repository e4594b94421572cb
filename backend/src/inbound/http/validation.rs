//! Form validation shared by every product and category route.
//!
//! Failures become `invalid_request` errors whose details name the offending
//! `field` and a stable `code`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;

use crate::domain::{
    AuthValidationError, CategoryName, Error, ProductDraft, ProductName, ProductValidationError,
    Quantity, UnitPrice,
};

/// Shortest accepted product or category name, in characters.
pub const MIN_NAME_CHARS: usize = 2;
/// Longest accepted product or category name, in characters.
pub const MAX_NAME_CHARS: usize = 50;
const MAX_PRICE_SCALE: u32 = 2;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    TooShort,
    TooLong,
    NotInteger,
    NotDecimal,
    Negative,
    TooManyDecimals,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::NotInteger => "not_integer",
            Self::NotDecimal => "not_decimal",
            Self::Negative => "negative",
            Self::TooManyDecimals => "too_many_decimals",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for form field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const NOMBRE: FieldName = FieldName::new("nombre");
pub(crate) const CANTIDAD: FieldName = FieldName::new("cantidad");
pub(crate) const PRECIO: FieldName = FieldName::new("precio");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn required(value: Option<&str>, field: FieldName) -> Result<&str, Error> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(field_error(
            field,
            ErrorCode::MissingField,
            format!("missing required field: {}", field.as_str()),
        )),
    }
}

/// Trimmed name between [`MIN_NAME_CHARS`] and [`MAX_NAME_CHARS`] characters.
pub(crate) fn parse_name(value: Option<&str>, field: FieldName) -> Result<String, Error> {
    let trimmed = required(value, field)?;
    let chars = trimmed.chars().count();
    if chars < MIN_NAME_CHARS {
        return Err(field_error(
            field,
            ErrorCode::TooShort,
            format!("{} must have at least {MIN_NAME_CHARS} characters", field.as_str()),
        ));
    }
    if chars > MAX_NAME_CHARS {
        return Err(field_error(
            field,
            ErrorCode::TooLong,
            format!("{} must have at most {MAX_NAME_CHARS} characters", field.as_str()),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Whole number, zero or more.
pub(crate) fn parse_quantity(value: Option<&str>) -> Result<Quantity, Error> {
    let raw = required(value, CANTIDAD)?;
    let parsed: i64 = raw.parse().map_err(|_| {
        field_error(
            CANTIDAD,
            ErrorCode::NotInteger,
            "cantidad must be a whole number",
        )
    })?;
    Quantity::new(parsed)
        .map_err(|_| field_error(CANTIDAD, ErrorCode::Negative, "cantidad must not be negative"))
}

/// Decimal price, zero or more, at most two fraction digits. A comma is
/// accepted as the decimal separator.
pub(crate) fn parse_price(value: Option<&str>) -> Result<UnitPrice, Error> {
    let raw = required(value, PRECIO)?.replace(',', ".");
    let parsed = Decimal::from_str(&raw)
        .map_err(|_| field_error(PRECIO, ErrorCode::NotDecimal, "precio must be a number"))?;
    if parsed.normalize().scale() > MAX_PRICE_SCALE {
        return Err(field_error(
            PRECIO,
            ErrorCode::TooManyDecimals,
            "precio must have at most two decimals",
        ));
    }
    UnitPrice::new(parsed).map_err(|err| match err {
        ProductValidationError::PriceOutOfRange => field_error(
            PRECIO,
            ErrorCode::OutOfRange,
            format!("precio must not exceed {}", UnitPrice::MAX),
        ),
        _ => field_error(PRECIO, ErrorCode::Negative, "precio must not be negative"),
    })
}

/// Validate the shared create/edit product form.
pub(crate) fn parse_product_form(
    nombre: Option<&str>,
    cantidad: Option<&str>,
    precio: Option<&str>,
) -> Result<ProductDraft, Error> {
    let name = parse_name(nombre, NOMBRE)?;
    let name = ProductName::new(name)
        .map_err(|err| field_error(NOMBRE, ErrorCode::MissingField, err.to_string()))?;
    Ok(ProductDraft::new(
        name,
        parse_quantity(cantidad)?,
        parse_price(precio)?,
    ))
}

/// Validate a category form.
pub(crate) fn parse_category_form(nombre: Option<&str>) -> Result<CategoryName, Error> {
    let name = parse_name(nombre, NOMBRE)?;
    CategoryName::new(name)
        .map_err(|err| field_error(NOMBRE, ErrorCode::MissingField, err.to_string()))
}

/// Map registration and login input failures onto field details.
pub(crate) fn auth_validation_error(err: &AuthValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}
