//! Business rules a payment must satisfy before it is sent to the bank.
//!
//! Rules run in a fixed order and the first violation wins. A payment that
//! fails here is never authorized or stored.

use super::card::{Card, YearMonth};
use super::payment::Payment;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("card number is required")]
    CardNumberRequired,
    #[error("card number must be between 14-19 digits")]
    CardNumberInvalid,
    #[error("card number must only contain numeric characters")]
    CardNumberNotNumeric,
    #[error("expiry month is required")]
    ExpiryMonthRequired,
    #[error("expiry month must be between 1-12")]
    ExpiryMonthInvalid,
    #[error("expiry year is required")]
    ExpiryYearRequired,
    #[error("expiry date must be in the future")]
    ExpiryDateInPast,
    #[error("CVV is required")]
    CvvRequired,
    #[error("CVV must be 3-4 digits")]
    CvvInvalid,
    #[error("CVV must only contain numeric characters")]
    CvvNotNumeric,
    #[error("currency is required")]
    CurrencyRequired,
    #[error("currency must be a valid 3-character ISO code ({allowed})")]
    CurrencyInvalid { allowed: String },
    #[error("amount must be a positive integer")]
    AmountInvalid,
}

/// The set of currency codes the gateway accepts.
///
/// Codes are stored uppercase. The set is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedCurrencies {
    codes: BTreeSet<String>,
}

impl SupportedCurrencies {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Comma separated, for error messages and logs.
    pub fn describe(&self) -> String {
        self.codes.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl Default for SupportedCurrencies {
    fn default() -> Self {
        Self::new(["USD", "GBP", "EUR"])
    }
}

/// Validates cards and payments against the gateway's business rules.
#[derive(Debug, Clone, Default)]
pub struct PaymentValidator {
    currencies: SupportedCurrencies,
}

impl PaymentValidator {
    pub fn new(currencies: SupportedCurrencies) -> Self {
        Self { currencies }
    }

    pub fn currencies(&self) -> &SupportedCurrencies {
        &self.currencies
    }

    /// Validates `payment` against the current month.
    ///
    /// On success the payment's currency is replaced by its uppercase form.
    pub fn validate(&self, payment: &mut Payment) -> Result<(), ValidationError> {
        self.validate_at(payment, YearMonth::current())
    }

    pub fn validate_at(
        &self,
        payment: &mut Payment,
        today: YearMonth,
    ) -> Result<(), ValidationError> {
        validate_card(&payment.card, today)?;
        let currency = self.validate_currency(&payment.currency)?;
        validate_amount(payment.amount)?;
        payment.currency = currency;
        Ok(())
    }

    /// Builds a payment from raw request fields, validating it on the way.
    pub fn new_payment(
        &self,
        card: Card,
        currency: impl Into<String>,
        amount: i64,
    ) -> Result<Payment, ValidationError> {
        let mut payment = Payment::new(card, currency, amount);
        self.validate(&mut payment)?;
        Ok(payment)
    }

    fn validate_currency(&self, currency: &str) -> Result<String, ValidationError> {
        if currency.is_empty() {
            return Err(ValidationError::CurrencyRequired);
        }
        let normalized = currency.to_uppercase();
        if normalized.chars().count() != 3 || !self.currencies.contains(&normalized) {
            return Err(ValidationError::CurrencyInvalid {
                allowed: self.currencies.describe(),
            });
        }
        Ok(normalized)
    }
}

pub fn validate_card(card: &Card, today: YearMonth) -> Result<(), ValidationError> {
    validate_number(&card.number)?;
    validate_expiry(card, today)?;
    validate_cvv(&card.cvv)
}

fn validate_number(number: &str) -> Result<(), ValidationError> {
    if number.is_empty() {
        return Err(ValidationError::CardNumberRequired);
    }
    if !(14..=19).contains(&number.len()) {
        return Err(ValidationError::CardNumberInvalid);
    }
    if !is_numeric(number) {
        return Err(ValidationError::CardNumberNotNumeric);
    }
    Ok(())
}

fn validate_expiry(card: &Card, today: YearMonth) -> Result<(), ValidationError> {
    if card.expiry_month == 0 {
        return Err(ValidationError::ExpiryMonthRequired);
    }
    if !(1..=12).contains(&card.expiry_month) {
        return Err(ValidationError::ExpiryMonthInvalid);
    }
    if card.expiry_year == 0 {
        return Err(ValidationError::ExpiryYearRequired);
    }
    // Day of month is ignored: a card expiring this month is valid all month.
    if card.expiry() < today {
        return Err(ValidationError::ExpiryDateInPast);
    }
    Ok(())
}

fn validate_cvv(cvv: &str) -> Result<(), ValidationError> {
    if cvv.is_empty() {
        return Err(ValidationError::CvvRequired);
    }
    if !(3..=4).contains(&cvv.len()) {
        return Err(ValidationError::CvvInvalid);
    }
    if !is_numeric(cvv) {
        return Err(ValidationError::CvvNotNumeric);
    }
    Ok(())
}

fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::AmountInvalid);
    }
    Ok(())
}

fn is_numeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}
