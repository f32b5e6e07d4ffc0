use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Late,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Late => "LATE",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Online,
    #[serde(other)]
    Unknown,
}

impl PaymentMethod {
    pub const ACCEPTED: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::Online,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Online => "ONLINE",
            PaymentMethod::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        PaymentMethod::ACCEPTED
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown payment method '{}' (expected CASH, CARD, BANK_TRANSFER or ONLINE)",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: u64,
    #[serde(default)]
    pub resident_id: Option<u64>,
    #[serde(default)]
    pub resident_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub food_charge: Option<f64>,
    #[serde(default)]
    pub late_fee: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default, with = "crate::models::date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, with = "crate::models::date")]
    pub paid_date: Option<NaiveDate>,
}

impl Payment {
    /// Amount shown for the row and summed into every aggregate.
    ///
    /// The backend total wins when it is present and positive; otherwise the
    /// parts are added, a missing part counting as zero.
    pub fn effective_total(&self) -> f64 {
        match self.total {
            Some(total) if total > 0.0 => total,
            _ => {
                self.amount.unwrap_or(0.0)
                    + self.food_charge.unwrap_or(0.0)
                    + self.late_fee.unwrap_or(0.0)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(PaymentStatus::Pending)
    }

    pub fn is_paid(&self) -> bool {
        self.status == Some(PaymentStatus::Paid)
    }
}
