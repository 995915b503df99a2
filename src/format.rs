//! Presentation helpers for currency and percentage strings

use serde::{Deserialize, Serialize};

/// Digit grouping used for the integer part of an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// 12,34,567 (lakh/crore)
    Indian,
    /// 1,234,567
    Western,
}

/// Currency symbol and grouping; amounts are always shown without decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            grouping: Grouping::Indian,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Round to a whole unit, group digits, and prefix the symbol
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}-", self.symbol);
        }
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());
        format!("{}{}{}", sign, self.symbol, group_digits(&digits, self.grouping))
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Amount in the default rupee format
pub fn format_currency(amount: f64) -> String {
    CurrencyFormat::default().format(amount)
}

/// One-decimal percentage string
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
