use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, ordered first by year and then by month.
///
/// Field order matters: the derived `Ord` compares `year` before `month`,
/// which is exactly the lexicographic comparison card expiry needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: i32,
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        Self { year, month }
    }

    /// The current month in UTC.
    pub fn current() -> Self {
        let now = Utc::now();
        Self::new(now.year(), now.month() as i32)
    }
}

/// Card details as received from the merchant.
///
/// The full number and CVV only ever leave this struct on the way to the
/// acquiring bank. `Debug` is implemented by hand so neither reaches a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Card {
    pub number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub cvv: String,
}

impl Card {
    pub fn new(
        number: impl Into<String>,
        expiry_month: i32,
        expiry_year: i32,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry_month,
            expiry_year,
            cvv: cvv.into(),
        }
    }

    /// Returns the last four characters of the card number, or the whole
    /// number if it is shorter than that.
    pub fn last_four(&self) -> String {
        let count = self.number.chars().count();
        self.number.chars().skip(count.saturating_sub(4)).collect()
    }

    pub fn expiry(&self) -> YearMonth {
        YearMonth::new(self.expiry_year, self.expiry_month)
    }

    /// Expiry in the `MM/YYYY` form the acquiring bank expects.
    pub fn expiry_date(&self) -> String {
        format!("{:02}/{}", self.expiry_month, self.expiry_year)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}
