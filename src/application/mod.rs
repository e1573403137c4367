//! Application layer containing the payment use cases.
//!
//! This module defines `PaymentService`, which ties the acquiring bank and
//! the payment record store together. Validation happens before a payment
//! reaches it.

pub mod service;
