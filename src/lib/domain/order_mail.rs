//! Order mail: compose mail from a template for one or many orders, preview it, send it
//! and keep a history of what was sent.

mod composer;
mod context;
mod history_repository;
mod mail_history;
mod report;
mod service;

pub mod errors;

pub use composer::{ComposedMessage, MessageComposer, OrderDetailsTemplate};
pub use context::{
    CompositionOverride, MailCompositionContext, SendMode, TargetOrderSet, TargetOrderSetError,
};
pub use history_repository::MailHistoryRepository;
pub use mail_history::{MailHistory, NewMailHistory};
pub use report::{DispatchFailure, DispatchFailureReason, DispatchReport, SendOutcome};
pub use service::{OrderMailConfig, OrderMailOverview, OrderMailService, OrderMailServiceImpl};
