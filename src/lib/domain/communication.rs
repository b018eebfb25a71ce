//! Communication with customers

pub mod email_addresses;
pub mod mailer;
