use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

// ─── AlertCondition ─────────────────────────────────────────────────

/// Direction a price has to cross for an alert to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCondition {
    Above,
    Below,
}

impl AlertCondition {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCondition::Above => "above",
            AlertCondition::Below => "below",
        }
    }
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertCondition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(AlertCondition::Above),
            "below" => Ok(AlertCondition::Below),
            _ =>
                Err(
                    AppError::InvalidInput(
                        format!("Invalid alert condition: {}. Supported: above, below", s)
                    )
                ),
        }
    }
}
