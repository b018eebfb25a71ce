//! Mail templates used as the base of order mail.

mod mail_template;
mod repository;

pub mod errors;

pub use mail_template::MailTemplate;
pub use repository::MailTemplateRepository;
