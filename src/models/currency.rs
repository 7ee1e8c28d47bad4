//! Settlement currencies
//!
//! Dominican pesos and US dollars are tracked as independent buckets and are
//! never converted into one another.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Dominican peso
    #[default]
    #[serde(rename = "DOP")]
    Dop,
    /// US dollar
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Dop, Currency::Usd];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dop => "DOP",
            Self::Usd => "USD",
        }
    }

    /// Symbol used when rendering amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Dop => "RD$",
            Self::Usd => "US$",
        }
    }

    /// Parse a currency code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DOP" | "RD$" => Some(Self::Dop),
            "USD" | "US$" => Some(Self::Usd),
            _ => None,
        }
    }

    /// Render an amount with this currency's symbol
    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(self.symbol())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
