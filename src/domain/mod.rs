//! Domain layer: cards, payments, validation rules and the ports the
//! application layer talks through.

pub mod card;
pub mod payment;
pub mod ports;
pub mod validation;
