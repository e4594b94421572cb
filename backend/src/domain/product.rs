//! Product records owned by the product store.
//!
//! ## Invariants
//! - [`ProductName`] is trimmed and never empty.
//! - [`Quantity`] is never negative.
//! - [`UnitPrice`] is never negative, never above [`UnitPrice::MAX`] and
//!   carries exactly two fraction digits.
//!
//! Storage enforces the same non-negative constraints independently.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Validation errors raised by the product value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Quantity was below zero.
    NegativeQuantity,
    /// Price was below zero.
    NegativePrice,
    /// Price does not fit the storage representation.
    PriceOutOfRange,
    /// Stock value exceeds the decimal range.
    ValueOutOfRange,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::NegativeQuantity => write!(f, "quantity must not be negative"),
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::PriceOutOfRange => write!(f, "price is out of range"),
            Self::ValueOutOfRange => write!(f, "stock value is out of range"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Store-generated product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product display name, used as the reconciliation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    /// Trim and validate a product name.
    ///
    /// # Examples
    /// ```
    /// use inventory_backend::domain::ProductName;
    ///
    /// let name = ProductName::new("  Pan ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Pan");
    /// assert!(ProductName::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProductValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Lower-cased form used by substring search.
    #[must_use]
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Units in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Quantity(i64);

impl Quantity {
    /// Zero units.
    pub const ZERO: Self = Self(0);

    /// Validate a non-negative quantity.
    pub fn new(value: i64) -> Result<Self, ProductValidationError> {
        if value < 0 {
            return Err(ProductValidationError::NegativeQuantity);
        }
        Ok(Self(value))
    }

    /// Build a quantity, clamping negative input to zero.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        Self(value.max(0))
    }

    /// Raw unit count.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Add incoming units, saturating at `i64::MAX`.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

/// Price per unit with two fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// Largest price whose cents fit an `i64`.
    pub const MAX: Self = Self(Decimal::from_parts(u32::MAX, i32::MAX as u32, 0, false, 2));

    /// Validate a price in `0..=MAX`, rounding to two fraction digits.
    ///
    /// # Examples
    /// ```
    /// use inventory_backend::domain::UnitPrice;
    /// use rust_decimal::Decimal;
    ///
    /// let price = UnitPrice::new(Decimal::new(2505, 3)).expect("valid price");
    /// assert_eq!(price.to_string(), "2.51");
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ProductValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ProductValidationError::NegativePrice);
        }
        if value > Self::MAX.0 {
            return Err(ProductValidationError::PriceOutOfRange);
        }
        let mut rounded = value.round_dp(2);
        rounded.rescale(2);
        Ok(Self(rounded))
    }

    /// Build a price, clamping input into `0..=MAX`.
    #[must_use]
    pub fn clamped(value: Decimal) -> Self {
        match Self::new(value) {
            Ok(price) => price,
            Err(ProductValidationError::PriceOutOfRange) => Self::MAX,
            Err(_) => Self::ZERO,
        }
    }

    /// Rebuild a price from integer cents as persisted by storage.
    pub fn from_cents(cents: i64) -> Result<Self, ProductValidationError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Integer cents for storage.
    pub fn cents(self) -> Result<i64, ProductValidationError> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .ok_or(ProductValidationError::PriceOutOfRange)
    }

    /// Decimal value.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values supplied when creating or editing a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: ProductName,
    pub quantity: Quantity,
    pub unit_price: UnitPrice,
}

impl ProductDraft {
    /// Bundle validated product values.
    #[must_use]
    pub fn new(name: ProductName, quantity: Quantity, unit_price: UnitPrice) -> Self {
        Self {
            name,
            quantity,
            unit_price,
        }
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    quantity: Quantity,
    unit_price: UnitPrice,
}

impl Product {
    /// Assemble a stored product from its identifier and values.
    #[must_use]
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        let ProductDraft {
            name,
            quantity,
            unit_price,
        } = draft;
        Self {
            id,
            name,
            quantity,
            unit_price,
        }
    }

    #[must_use]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &ProductName {
        &self.name
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    /// Stock value of this line: quantity times unit price, or `None` when
    /// the product exceeds the decimal range.
    #[must_use]
    pub fn stock_value(&self) -> Option<Decimal> {
        Decimal::from(self.quantity.get()).checked_mul(self.unit_price.amount())
    }

    /// Current values as a draft, for edit forms.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft::new(self.name.clone(), self.quantity, self.unit_price)
    }
}

/// Product listing with aggregate totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    pub products: Vec<Product>,
    pub total_items: i64,
    pub total_value: Decimal,
}

impl InventorySummary {
    /// Compute totals over the given products.
    ///
    /// Fails with [`ProductValidationError::ValueOutOfRange`] when a line
    /// value or the running total overflows.
    pub fn from_products(products: Vec<Product>) -> Result<Self, ProductValidationError> {
        let total_items = products
            .iter()
            .fold(0_i64, |acc, product| acc.saturating_add(product.quantity().get()));
        let total_value = products.iter().try_fold(Decimal::ZERO, |acc, product| {
            product
                .stock_value()
                .and_then(|value| acc.checked_add(value))
                .ok_or(ProductValidationError::ValueOutOfRange)
        })?;
        Ok(Self {
            products,
            total_items,
            total_value,
        })
    }
}
