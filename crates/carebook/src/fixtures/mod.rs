//! Static marketplace data served until the real booking and wallet APIs exist.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::Upcoming => "Upcoming",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// A booked care session between a client and a nanny.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingOrder {
    pub id: String,
    pub client_name: String,
    pub nanny_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub hours: u8,
    pub hourly_rate_cents: u32,
    pub status: OrderStatus,
}

impl BookingOrder {
    pub fn total_cents(&self) -> u64 {
        u64::from(self.hours) * u64::from(self.hourly_rate_cents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    TopUp,
    Payment,
    Refund,
    Payout,
}

/// Signed wallet movement; debits are negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub balance_cents: i64,
    pub credits_cents: i64,
    pub debits_cents: i64,
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub account_holder: String,
    pub masked_number: String,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NannyProfile {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub reviews: u32,
    pub hourly_rate_cents: u32,
    pub years_experience: u8,
    pub languages: Vec<String>,
    pub verified: bool,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Keep the last four digits only.
pub fn mask_account_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("•••• {tail}")
}

pub fn orders() -> Vec<BookingOrder> {
    let order = |id: &str,
                 client: &str,
                 nanny: &str,
                 day: NaiveDate,
                 start: NaiveTime,
                 hours: u8,
                 rate: u32,
                 status: OrderStatus| BookingOrder {
        id: id.to_string(),
        client_name: client.to_string(),
        nanny_name: nanny.to_string(),
        date: day,
        start_time: start,
        hours,
        hourly_rate_cents: rate,
        status,
    };

    vec![
        order(
            "ord-1001",
            "Amara Okafor",
            "Grace Mensah",
            date(2025, 3, 14),
            time(9, 0),
            4,
            1800,
            OrderStatus::Upcoming,
        ),
        order(
            "ord-1002",
            "Daniel Reyes",
            "Sofia Lindqvist",
            date(2025, 3, 12),
            time(17, 30),
            3,
            2200,
            OrderStatus::InProgress,
        ),
        order(
            "ord-1003",
            "Amara Okafor",
            "Grace Mensah",
            date(2025, 3, 7),
            time(8, 0),
            8,
            1800,
            OrderStatus::Completed,
        ),
        order(
            "ord-1004",
            "Priya Natarajan",
            "Hannah Cole",
            date(2025, 3, 5),
            time(13, 0),
            2,
            2000,
            OrderStatus::Cancelled,
        ),
    ]
}

pub fn orders_with_status(status: OrderStatus) -> Vec<BookingOrder> {
    orders()
        .into_iter()
        .filter(|order| order.status == status)
        .collect()
}

pub fn wallet_transactions() -> Vec<WalletTransaction> {
    let entry = |id: &str,
                 day: NaiveDate,
                 description: &str,
                 kind: TransactionKind,
                 amount_cents: i64| WalletTransaction {
        id: id.to_string(),
        date: day,
        description: description.to_string(),
        kind,
        amount_cents,
    };

    vec![
        entry(
            "txn-501",
            date(2025, 3, 1),
            "Wallet top up",
            TransactionKind::TopUp,
            50_000,
        ),
        entry(
            "txn-502",
            date(2025, 3, 7),
            "Booking ord-1003 with Grace Mensah",
            TransactionKind::Payment,
            -14_400,
        ),
        entry(
            "txn-503",
            date(2025, 3, 5),
            "Refund for cancelled booking ord-1004",
            TransactionKind::Refund,
            4_000,
        ),
        entry(
            "txn-504",
            date(2025, 3, 10),
            "Transfer to bank account",
            TransactionKind::Payout,
            -20_000,
        ),
    ]
}

pub fn wallet_summary() -> WalletSummary {
    let mut transactions = wallet_transactions();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    let credits_cents: i64 = transactions
        .iter()
        .map(|txn| txn.amount_cents)
        .filter(|amount| *amount > 0)
        .sum();
    let debits_cents: i64 = transactions
        .iter()
        .map(|txn| txn.amount_cents)
        .filter(|amount| *amount < 0)
        .sum();

    WalletSummary {
        balance_cents: credits_cents + debits_cents,
        credits_cents,
        debits_cents,
        transactions,
    }
}

pub fn bank_accounts() -> Vec<BankAccount> {
    vec![
        BankAccount {
            id: "bank-1".to_string(),
            bank_name: "First Prairie Bank".to_string(),
            account_holder: "Grace Mensah".to_string(),
            masked_number: mask_account_number("0047 2210 9384"),
            primary: true,
        },
        BankAccount {
            id: "bank-2".to_string(),
            bank_name: "Heartland Credit Union".to_string(),
            account_holder: "Grace Mensah".to_string(),
            masked_number: mask_account_number("7781-0032-5516"),
            primary: false,
        },
    ]
}

pub fn nannies() -> Vec<NannyProfile> {
    let languages =
        |list: &[&str]| -> Vec<String> { list.iter().map(|lang| lang.to_string()).collect() };

    vec![
        NannyProfile {
            id: "nanny-1".to_string(),
            name: "Grace Mensah".to_string(),
            rating: 4.9,
            reviews: 128,
            hourly_rate_cents: 1800,
            years_experience: 7,
            languages: languages(&["English", "Twi"]),
            verified: true,
        },
        NannyProfile {
            id: "nanny-2".to_string(),
            name: "Sofia Lindqvist".to_string(),
            rating: 4.7,
            reviews: 64,
            hourly_rate_cents: 2200,
            years_experience: 4,
            languages: languages(&["English", "Swedish"]),
            verified: true,
        },
        NannyProfile {
            id: "nanny-3".to_string(),
            name: "Hannah Cole".to_string(),
            rating: 4.5,
            reviews: 19,
            hourly_rate_cents: 2000,
            years_experience: 2,
            languages: languages(&["English"]),
            verified: false,
        },
    ]
}
