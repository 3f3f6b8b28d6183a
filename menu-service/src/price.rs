use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use diesel::{
    backend::Backend,
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
    sqlite::Sqlite,
};

/// Number of fractional digits every price is normalized to.
const SCALE: i64 = 2;
/// Longest price text accepted before decimal parsing.
const MAX_INPUT_LEN: usize = 32;
/// Largest power of ten an amount may carry before rounding.
const MAX_EXPONENT: i64 = 12;
/// Most fractional digits an amount may carry before rounding.
const MAX_FRACTION_DIGITS: i64 = 18;
const MAX_COEFFICIENT_BITS: u64 = 128;

/// Menu item price.
///
/// Parsed once from form input (an optional leading `$` is accepted) and
/// kept as a whole number of cents from then on. The store holds the
/// canonical text (`7.50`); `Display` renders it the way menus print it
/// (`$7.50`).
#[derive(FromSqlRow, AsExpression, PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
#[diesel(sql_type = Text)]
pub struct Price {
    cents: i64,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("price is required")]
    Empty,
    #[error("invalid price: {0}")]
    Invalid(String),
    #[error("price must not be negative")]
    Negative,
    #[error("price is out of range")]
    OutOfRange,
}

impl Price {
    pub fn new(amount: BigDecimal) -> Result<Self, PriceError> {
        // Checked before any rescaling.
        let (coefficient, scale) = amount.as_bigint_and_exponent();
        if scale < -MAX_EXPONENT
            || scale > MAX_FRACTION_DIGITS
            || coefficient.bits() > MAX_COEFFICIENT_BITS
        {
            return Err(PriceError::OutOfRange);
        }
        if amount < BigDecimal::from(0) {
            return Err(PriceError::Negative);
        }
        let rounded =
            amount.with_scale_round(SCALE, RoundingMode::HalfUp) * BigDecimal::from(100);
        let (cents, _) = rounded.with_scale(0).as_bigint_and_exponent();
        let cents = i64::try_from(&cents).map_err(|_| PriceError::OutOfRange)?;
        Ok(Self { cents })
    }

    /// Canonical stored form, always with two fractional digits.
    fn plain(&self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        if trimmed.len() > MAX_INPUT_LEN {
            return Err(PriceError::OutOfRange);
        }
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
        let amount = digits
            .parse::<BigDecimal>()
            .map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.plain())
    }
}

impl ToSql<Text, Sqlite> for Price {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.plain());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for Price {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(text.parse()?)
    }
}
