use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookbackUnit {
    Day,
    Week,
    Month,
    Year,
}

impl LookbackUnit {
    fn suffix(&self) -> &'static str {
        match self {
            LookbackUnit::Day => "d",
            LookbackUnit::Week => "wk",
            LookbackUnit::Month => "mo",
            LookbackUnit::Year => "y",
        }
    }
}

/// Trailing calendar window for price history, written the way the upstream
/// chart API expects its `range` parameter (`5d`, `3mo`, `1y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lookback {
    pub amount: u32,
    pub unit: LookbackUnit,
}

impl Lookback {
    pub fn new(amount: u32, unit: LookbackUnit) -> Result<Self, String> {
        if amount == 0 {
            return Err("Lookback amount must be positive".to_string());
        }
        Ok(Self { amount, unit })
    }

    pub fn months(amount: u32) -> Self {
        Self {
            amount: amount.max(1),
            unit: LookbackUnit::Month,
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::months(3)
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("Invalid lookback: {s}. Use e.g. 5d, 2wk, 3mo, 1y"))?;
        let (num, unit) = s.split_at(split);
        let amount: u32 = num
            .parse()
            .map_err(|_| format!("Invalid lookback: {s}. Use e.g. 5d, 2wk, 3mo, 1y"))?;
        let unit = match unit {
            "d" => LookbackUnit::Day,
            "wk" => LookbackUnit::Week,
            "mo" => LookbackUnit::Month,
            "y" => LookbackUnit::Year,
            _ => return Err(format!("Unknown lookback unit: {unit}")),
        };
        Lookback::new(amount, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let lb: Lookback = "3mo".parse().unwrap();
        assert_eq!(lb, Lookback::months(3));
        assert_eq!(lb.to_string(), "3mo");
        assert_eq!("2WK".parse::<Lookback>().unwrap().to_string(), "2wk");
        assert_eq!("1y".parse::<Lookback>().unwrap().unit, LookbackUnit::Year);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("mo".parse::<Lookback>().is_err());
        assert!("3".parse::<Lookback>().is_err());
        assert!("0d".parse::<Lookback>().is_err());
        assert!("3months".parse::<Lookback>().is_err());
    }
}
