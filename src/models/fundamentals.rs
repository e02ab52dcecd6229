use serde::{Deserialize, Serialize};

/// Trailing valuation metrics at fetch time. Either field may be unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_eps: Option<f64>,
}

impl Fundamentals {
    pub fn new(trailing_pe: Option<f64>, trailing_eps: Option<f64>) -> Self {
        Self {
            trailing_pe: trailing_pe.filter(|v| v.is_finite()),
            trailing_eps: trailing_eps.filter(|v| v.is_finite()),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}
