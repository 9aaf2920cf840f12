//! Bar and tick specifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar aggregation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregation {
    Second,
    Minute,
    Hour,
    Day,
}

impl Aggregation {
    /// Duration of one unit in seconds.
    pub fn unit_secs(&self) -> u64 {
        match self {
            Aggregation::Second => 1,
            Aggregation::Minute => 60,
            Aggregation::Hour => 3600,
            Aggregation::Day => 86400,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Second => "SECOND",
            Aggregation::Minute => "MINUTE",
            Aggregation::Hour => "HOUR",
            Aggregation::Day => "DAY",
        }
    }
}

/// Price series a bar is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceType {
    Last,
    Mid,
    Bid,
    Ask,
}

impl PriceType {
    fn as_str(&self) -> &'static str {
        match self {
            PriceType::Last => "LAST",
            PriceType::Mid => "MID",
            PriceType::Bid => "BID",
            PriceType::Ask => "ASK",
        }
    }
}

/// Bar cadence specification, wire format `<step>-<AGGREGATION>-<PRICE_TYPE>`
/// (e.g. `1-MINUTE-LAST`, `5-MINUTE-MID`, `1-DAY-LAST`).
///
/// The fetch layer treats this as an opaque token passed through to the
/// transport; parsing exists for the CLI/config edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarSpec {
    pub step: u32,
    pub aggregation: Aggregation,
    pub price_type: PriceType,
}

impl BarSpec {
    pub fn new(step: u32, aggregation: Aggregation, price_type: PriceType) -> Self {
        Self {
            step,
            aggregation,
            price_type,
        }
    }

    /// Duration covered by one bar, in seconds.
    pub fn bar_secs(&self) -> u64 {
        self.step as u64 * self.aggregation.unit_secs()
    }
}

impl fmt::Display for BarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.step,
            self.aggregation.as_str(),
            self.price_type.as_str()
        )
    }
}

impl FromStr for BarSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let step = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| format!("Invalid bar spec step in: {}", s))?;
        if step == 0 {
            return Err(format!("Bar spec step must be positive: {}", s));
        }
        let aggregation = match parts.next() {
            Some("SECOND") => Aggregation::Second,
            Some("MINUTE") => Aggregation::Minute,
            Some("HOUR") => Aggregation::Hour,
            Some("DAY") => Aggregation::Day,
            _ => return Err(format!("Invalid aggregation in bar spec: {}", s)),
        };
        let price_type = match parts.next() {
            Some("LAST") => PriceType::Last,
            Some("MID") => PriceType::Mid,
            Some("BID") => PriceType::Bid,
            Some("ASK") => PriceType::Ask,
            _ => return Err(format!("Invalid price type in bar spec: {}", s)),
        };
        Ok(Self::new(step, aggregation, price_type))
    }
}

/// Tick stream label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickType {
    /// Trade prints, wire label `TRADES`.
    Trades,
    /// Top-of-book quotes, wire label `BID_ASK`.
    Quotes,
}

impl fmt::Display for TickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TickType::Trades => "TRADES",
            TickType::Quotes => "BID_ASK",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TickType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRADES" => Ok(TickType::Trades),
            "BID_ASK" => Ok(TickType::Quotes),
            _ => Err(format!("Invalid tick type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_spec_parse() {
        let spec: BarSpec = "1-MINUTE-LAST".parse().unwrap();
        assert_eq!(spec, BarSpec::new(1, Aggregation::Minute, PriceType::Last));

        let spec: BarSpec = "5-MINUTE-MID".parse().unwrap();
        assert_eq!(spec.step, 5);
        assert_eq!(spec.price_type, PriceType::Mid);

        let spec: BarSpec = "1-DAY-LAST".parse().unwrap();
        assert_eq!(spec.aggregation, Aggregation::Day);
    }

    #[test]
    fn test_bar_spec_display() {
        let spec = BarSpec::new(15, Aggregation::Minute, PriceType::Bid);
        assert_eq!(spec.to_string(), "15-MINUTE-BID");
    }

    #[test]
    fn test_bar_spec_rejects_malformed() {
        assert!("".parse::<BarSpec>().is_err());
        assert!("0-MINUTE-LAST".parse::<BarSpec>().is_err());
        assert!("1-FORTNIGHT-LAST".parse::<BarSpec>().is_err());
        assert!("1-MINUTE-VWAP".parse::<BarSpec>().is_err());
        assert!("x-MINUTE-LAST".parse::<BarSpec>().is_err());
    }

    #[test]
    fn test_bar_secs() {
        let spec: BarSpec = "5-MINUTE-LAST".parse().unwrap();
        assert_eq!(spec.bar_secs(), 300);
        let spec: BarSpec = "1-DAY-LAST".parse().unwrap();
        assert_eq!(spec.bar_secs(), 86400);
    }

    #[test]
    fn test_tick_type_labels() {
        assert_eq!(TickType::Trades.to_string(), "TRADES");
        assert_eq!("BID_ASK".parse::<TickType>().unwrap(), TickType::Quotes);
        assert!("QUOTES".parse::<TickType>().is_err());
    }
}
