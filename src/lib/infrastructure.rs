//! Adapters for the domain's ports: Postgres, SMTP and the HTTP API

pub mod db;
pub mod email;
pub mod http;
pub mod settings;
