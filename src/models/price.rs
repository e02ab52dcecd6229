use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closes for one symbol, oldest first, one point per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by date and keeping the last point seen for a repeated date.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        // Stable sort keeps arrival order within a date, so the last one wins below.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// History window requested from the price provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackPeriod {
    Months(u32),
    Years(u32),
}

impl LookbackPeriod {
    /// Range token understood by the chart API (`6mo`, `1y`, ...).
    pub fn as_range(&self) -> String {
        match self {
            LookbackPeriod::Months(n) => format!("{}mo", n),
            LookbackPeriod::Years(n) => format!("{}y", n),
        }
    }
}

impl Default for LookbackPeriod {
    fn default() -> Self {
        LookbackPeriod::Years(1)
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_range())
    }
}

impl FromStr for LookbackPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (digits, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()));
        let n: u32 = digits
            .parse()
            .map_err(|_| format!("expected a count followed by 'mo' or 'y', got '{}'", s))?;
        if n == 0 {
            return Err("lookback must be at least one unit".to_string());
        }
        match unit {
            "mo" => Ok(LookbackPeriod::Months(n)),
            "y" => Ok(LookbackPeriod::Years(n)),
            other => Err(format!("unknown lookback unit '{}'", other)),
        }
    }
}
