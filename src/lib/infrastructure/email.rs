//! Outbound email adapters

pub mod smtp;
