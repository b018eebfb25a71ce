//! Customer orders targeted by order mail.

mod order;
mod repository;

pub mod errors;

pub use order::{Order, OrderId, OrderItem};
pub use repository::OrderRepository;
