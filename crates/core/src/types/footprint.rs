//! Carbon footprint values.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A carbon footprint in kilograms of CO2-equivalent.
///
/// Backed by [`Decimal`] so footprint sums are exact: an order of
/// 2 × 2.5 kg + 1 × 4.2 kg totals exactly 9.2 kg, with no float drift.
/// The same type carries a product's per-unit footprint, an order's total,
/// and a user's running "carbon saved" counter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Footprint(Decimal);

impl Footprint {
    /// Zero footprint.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a footprint from a decimal kg CO2e value.
    #[must_use]
    pub const fn new(kg: Decimal) -> Self {
        Self(kg)
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Scale a per-unit footprint by an order line quantity.
    #[must_use]
    pub fn scaled(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Footprint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Footprint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Footprint {
    fn from(kg: Decimal) -> Self {
        Self(kg)
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.0)
    }
}

// SQLx support (with postgres feature): stored as NUMERIC
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Footprint {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Footprint {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let kg = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(kg))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Footprint {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kg(s: &str) -> Footprint {
        Footprint::new(s.parse().unwrap())
    }

    #[test]
    fn test_scaled() {
        assert_eq!(kg("2.5").scaled(2), kg("5.0"));
        assert_eq!(kg("4.2").scaled(1), kg("4.2"));
        assert_eq!(kg("1.8").scaled(0), Footprint::ZERO);
    }

    #[test]
    fn test_sum_is_exact() {
        // 2 x 2.5 + 1 x 4.2 = 9.2, exactly (would fail with f64)
        let total: Footprint = [kg("2.5").scaled(2), kg("4.2").scaled(1)]
            .into_iter()
            .sum();
        assert_eq!(total, kg("9.2"));
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total: Footprint = core::iter::empty().sum();
        assert_eq!(total, Footprint::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(kg("4.2").to_string(), "4.2 kg");
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let json = serde_json::to_string(&kg("9.2")).unwrap();
        assert_eq!(json, "\"9.2\"");

        let parsed: Footprint = serde_json::from_str("\"9.2\"").unwrap();
        assert_eq!(parsed, kg("9.2"));
    }
}
