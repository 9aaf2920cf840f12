//! Instrument identifiers and definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference to a tradeable instrument: symbol plus listing venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId {
    pub symbol: String,
    pub venue: String,
}

impl InstrumentId {
    /// Create a new instrument id.
    pub fn new(symbol: impl Into<String>, venue: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            venue: venue.into(),
        }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.symbol, self.venue)
    }
}

impl FromStr for InstrumentId {
    type Err = String;

    /// Parse `SYMBOL.VENUE`, splitting on the last dot so dotted tickers
    /// like `BRK.B.NYSE` keep the symbol intact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('.') {
            Some((symbol, venue)) if !symbol.is_empty() && !venue.is_empty() => {
                Ok(Self::new(symbol, venue))
            }
            _ => Err(format!("Invalid instrument id: {}", s)),
        }
    }
}

/// Instrument metadata as reported by the session transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentDef {
    pub id: InstrumentId,
    /// Human-readable name, e.g. "APPLE INC".
    pub name: String,
    /// Asset class label, e.g. "STK", "FUT", "CASH".
    pub asset_class: String,
    pub currency: String,
    /// Minimum price increment.
    pub price_increment: f64,
    /// Contract multiplier; 1.0 for cash equities.
    pub multiplier: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_id_roundtrip() {
        let id = InstrumentId::new("AAPL", "NASDAQ");
        assert_eq!(id.to_string(), "AAPL.NASDAQ");
        assert_eq!("AAPL.NASDAQ".parse::<InstrumentId>().unwrap(), id);
    }

    #[test]
    fn test_instrument_id_dotted_symbol() {
        let id = "BRK.B.NYSE".parse::<InstrumentId>().unwrap();
        assert_eq!(id.symbol, "BRK.B");
        assert_eq!(id.venue, "NYSE");
    }

    #[test]
    fn test_instrument_id_invalid() {
        assert!("AAPL".parse::<InstrumentId>().is_err());
        assert!(".NASDAQ".parse::<InstrumentId>().is_err());
        assert!("AAPL.".parse::<InstrumentId>().is_err());
    }
}
