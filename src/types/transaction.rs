//! Synthetic transaction records scored by the fraud heuristic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Merchants a synthetic transaction can be made at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Merchant {
    Amazon,
    Walmart,
    Target,
    #[serde(rename = "Best Buy")]
    BestBuy,
    Shell,
    #[serde(rename = "McDonald's")]
    McDonalds,
    Starbucks,
}

impl Merchant {
    pub const ALL: [Merchant; 7] = [
        Merchant::Amazon,
        Merchant::Walmart,
        Merchant::Target,
        Merchant::BestBuy,
        Merchant::Shell,
        Merchant::McDonalds,
        Merchant::Starbucks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Merchant::Amazon => "Amazon",
            Merchant::Walmart => "Walmart",
            Merchant::Target => "Target",
            Merchant::BestBuy => "Best Buy",
            Merchant::Shell => "Shell",
            Merchant::McDonalds => "McDonald's",
            Merchant::Starbucks => "Starbucks",
        }
    }
}

impl fmt::Display for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Merchant category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Retail,
    GasStation,
    Restaurant,
    Electronics,
    Grocery,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Retail,
        Category::GasStation,
        Category::Restaurant,
        Category::Electronics,
        Category::Grocery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Retail => "retail",
            Category::GasStation => "gas_station",
            Category::Restaurant => "restaurant",
            Category::Electronics => "electronics",
            Category::Grocery => "grocery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One synthetic payment with its heuristic fraud score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `TXN_` followed by six digits
    pub transaction_id: String,

    /// `USER_` followed by four digits
    pub user_id: String,

    /// Amount in dollars, within [10, 5000]
    pub amount: f64,

    pub merchant: Merchant,

    pub category: Category,

    /// Location risk within [0, 1]
    pub location_risk_score: f64,

    /// Hour of day within [0, 23]
    pub hour_of_day: u32,

    pub is_weekend: bool,

    /// Hour before 06:00 or after 22:00
    pub is_night: bool,

    /// Heuristic fraud probability within [0, 0.95]
    pub fraud_probability: f64,

    /// Set exactly when `fraud_probability > 0.5`
    pub is_fraud: bool,

    /// Simulated scoring latency in milliseconds
    pub processing_time_ms: f64,

    /// Backdated by up to one hour
    pub timestamp: DateTime<Utc>,
}
