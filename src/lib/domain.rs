//! Domain models, services and the ports they depend on

pub mod communication;
pub mod mail_templates;
pub mod order_mail;
pub mod orders;
