//! Value Objects for the admin panel

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Defines an integer identifier newtype so ids of different entities cannot be mixed.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self { Self(value) }
            pub const fn value(&self) -> i64 { self.0 }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self { Self(value) }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self { id.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
        }
    };
}

define_id!(
    /// Catalog product identifier
    ProductId
);
define_id!(
    /// Store identifier
    StoreId
);
define_id!(
    /// Panel user identifier
    UserId
);
define_id!(
    /// Identifier assigned by the order service
    OrderId
);

/// Money value object
///
/// Single-currency amount backed by `Decimal` so long carts do not drift.
/// Rounding only happens in [`Money::display`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self { Self(amount) }
    pub fn amount(&self) -> Decimal { self.0 }
    /// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
    pub fn add(&self, other: Money) -> Money { Money(self.0.saturating_add(other.0)) }
    pub fn multiply(&self, qty: Quantity) -> Money { Money(self.0.saturating_mul(Decimal::from(qty.value()))) }

    /// Fixed two-decimal rendering, e.g. `$25.00`.
    pub fn display(&self) -> String {
        let rounded = self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${:.2}", rounded)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc.add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.display()) }
}

/// Quantity value object
///
/// Always at least one; a cart line that would drop to zero has no `Quantity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn new(value: u32) -> Option<Self> { NonZeroU32::new(value).map(Self) }
    pub fn value(&self) -> u32 { self.0.get() }

    /// Applies a signed delta to `current`, clamping at zero.
    /// Returns `None` when the result is zero.
    pub fn offset(current: u32, delta: i64) -> Option<Self> {
        let next = i64::from(current).saturating_add(delta).max(0);
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        Self::new(next)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}
