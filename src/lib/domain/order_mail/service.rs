//! Order mail service module

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::mailer::{Mailer, Message},
    mail_templates::{MailTemplate, MailTemplateRepository},
    orders::{Order, OrderId, OrderRepository},
};

use super::{
    errors::{GetMailHistoryError, OrderMailError},
    ComposedMessage, DispatchFailure, DispatchFailureReason, DispatchReport, MailCompositionContext,
    MailHistory, MailHistoryRepository, MessageComposer, NewMailHistory, SendMode, SendOutcome,
    TargetOrderSet,
};

/// Shop-level settings used when sending order mail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderMailConfig {
    /// Shop display name, used as the subject prefix
    pub shop_name: String,

    /// How long to wait for the transport to accept one message
    pub send_timeout: Duration,
}

/// An order together with the mail sent for it and the templates available
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderMailOverview {
    /// The order
    pub order: Order,

    /// Mail already sent for the order, newest first
    pub histories: Vec<MailHistory>,

    /// Templates to choose from
    pub templates: Vec<MailTemplate>,
}

/// Order mail service
#[async_trait]
pub trait OrderMailService: Clone + Send + Sync + 'static {
    /// Composes the mail for every target order without sending or recording anything.
    ///
    /// # Arguments
    /// * `context` - The template, overrides and target orders.
    ///
    /// # Returns
    /// The composed messages in target order, or an [`OrderMailError`] if the template or
    /// an order is missing, or an order has no customer email.
    async fn preview(
        &self,
        context: &MailCompositionContext,
    ) -> Result<Vec<ComposedMessage>, OrderMailError>;

    /// Sends the mail for every target order and records a history for each one sent.
    ///
    /// # Arguments
    /// * `context` - The template, overrides and target orders.
    ///
    /// # Returns
    /// A [`DispatchReport`] listing the orders that could not be mailed. An
    /// [`OrderMailError`] is only returned when nothing was sent.
    async fn dispatch(
        &self,
        context: &MailCompositionContext,
    ) -> Result<DispatchReport, OrderMailError>;

    /// Lists the templates that mail can be based on.
    async fn list_mail_templates(&self) -> Result<Vec<MailTemplate>, OrderMailError>;

    /// Retrieves a sent mail by its history ID.
    async fn get_mail_history(&self, id: &Uuid) -> Result<MailHistory, GetMailHistoryError>;

    /// Retrieves an order with its mail history and the available templates.
    async fn get_order_mail_overview(
        &self,
        order_id: OrderId,
    ) -> Result<OrderMailOverview, OrderMailError>;
}

#[cfg(test)]
mock! {
    pub OrderMailService {}

    impl Clone for OrderMailService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl OrderMailService for OrderMailService {
        async fn preview(&self, context: &MailCompositionContext) -> Result<Vec<ComposedMessage>, OrderMailError>;
        async fn dispatch(&self, context: &MailCompositionContext) -> Result<DispatchReport, OrderMailError>;
        async fn list_mail_templates(&self) -> Result<Vec<MailTemplate>, OrderMailError>;
        async fn get_mail_history(&self, id: &Uuid) -> Result<MailHistory, GetMailHistoryError>;
        async fn get_order_mail_overview(&self, order_id: OrderId) -> Result<OrderMailOverview, OrderMailError>;
    }
}

/// Order mail service implementation
#[derive(Debug, Clone)]
pub struct OrderMailServiceImpl<O, T, H, M>
where
    O: OrderRepository,
    T: MailTemplateRepository,
    H: MailHistoryRepository,
    M: Mailer,
{
    orders: Arc<O>,
    templates: Arc<T>,
    histories: Arc<H>,
    mailer: Arc<M>,
    config: OrderMailConfig,
}

impl<O, T, H, M> OrderMailServiceImpl<O, T, H, M>
where
    O: OrderRepository,
    T: MailTemplateRepository,
    H: MailHistoryRepository,
    M: Mailer,
{
    /// Create a new order mail service
    pub fn new(
        orders: Arc<O>,
        templates: Arc<T>,
        histories: Arc<H>,
        mailer: Arc<M>,
        config: OrderMailConfig,
    ) -> Self {
        Self {
            orders,
            templates,
            histories,
            mailer,
            config,
        }
    }

    /// Runs the workflow in the given mode.
    ///
    /// [`SendMode::Confirm`] is [`OrderMailService::preview`] and
    /// [`SendMode::Complete`] is [`OrderMailService::dispatch`].
    pub async fn run(
        &self,
        context: &MailCompositionContext,
        mode: SendMode,
    ) -> Result<SendOutcome, OrderMailError> {
        match mode {
            SendMode::Confirm => self.preview(context).await.map(SendOutcome::Previewed),
            SendMode::Complete => self.dispatch(context).await.map(SendOutcome::Dispatched),
        }
    }

    /// Resolves the template and every target order. Nothing is sent if this fails.
    async fn prepare(
        &self,
        context: &MailCompositionContext,
    ) -> Result<(MailTemplate, Vec<Order>), OrderMailError> {
        let template = self
            .templates
            .get_mail_template_by_id(context.template_id)
            .await?;

        let orders = self.resolve_orders(&context.orders).await?;

        Ok((template, orders))
    }

    /// Loads the target orders in target order, failing if any are missing
    async fn resolve_orders(&self, targets: &TargetOrderSet) -> Result<Vec<Order>, OrderMailError> {
        let mut found: HashMap<OrderId, Order> = self
            .orders
            .get_orders_by_ids(targets.ids())
            .await?
            .into_iter()
            .map(|order| (order.id, order))
            .collect();

        let missing: Vec<OrderId> = targets
            .iter()
            .filter(|id| !found.contains_key(id))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(OrderMailError::OrdersNotFound(missing));
        }

        Ok(targets.iter().filter_map(|id| found.remove(id)).collect())
    }

    async fn dispatch_orders(
        &self,
        composer: &MessageComposer<'_>,
        orders: &[Order],
        creator: Uuid,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for order in orders {
            match self.dispatch_order(composer, order, creator).await {
                Ok(recorded) => {
                    report.sent_count += 1;

                    if !recorded {
                        report.unrecorded_order_ids.push(order.id);
                    }
                }
                Err(reason) => {
                    warn!(order_id = %order.id, %reason, "order mail was not sent");

                    report.failures.push(DispatchFailure {
                        order_id: order.id,
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Sends one order's mail. `Ok(false)` means it was sent but its history was not written.
    async fn dispatch_order(
        &self,
        composer: &MessageComposer<'_>,
        order: &Order,
        creator: Uuid,
    ) -> Result<bool, DispatchFailureReason> {
        let message = composer.compose(order)?;

        timeout(
            self.config.send_timeout,
            self.mailer.send_email(&Message::from(&message)),
        )
        .await
        .map_err(|_| DispatchFailureReason::TimedOut)??;

        // The mail has left, so a failed write is reported but does not undo the send.
        match self
            .histories
            .record_mail_history(&NewMailHistory::new(&message, creator))
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                error!(order_id = %order.id, error = %err, "could not record mail history");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl<O, T, H, M> OrderMailService for OrderMailServiceImpl<O, T, H, M>
where
    O: OrderRepository,
    T: MailTemplateRepository,
    H: MailHistoryRepository,
    M: Mailer,
{
    async fn preview(
        &self,
        context: &MailCompositionContext,
    ) -> Result<Vec<ComposedMessage>, OrderMailError> {
        let (template, orders) = self.prepare(context).await?;

        let composer =
            MessageComposer::new(&template, &context.overrides, &self.config.shop_name);

        let messages = orders
            .iter()
            .map(|order| composer.compose(order))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            template_id = context.template_id,
            count = messages.len(),
            "composed order mail preview"
        );

        Ok(messages)
    }

    async fn dispatch(
        &self,
        context: &MailCompositionContext,
    ) -> Result<DispatchReport, OrderMailError> {
        let (template, orders) = self.prepare(context).await?;

        let composer =
            MessageComposer::new(&template, &context.overrides, &self.config.shop_name);

        info!(
            template_id = context.template_id,
            count = orders.len(),
            "sending order mail"
        );

        let report = self
            .dispatch_orders(&composer, &orders, context.creator)
            .await;

        info!(
            sent = report.sent_count,
            failed = report.failures.len(),
            unrecorded = report.unrecorded_order_ids.len(),
            "finished sending order mail"
        );

        Ok(report)
    }

    async fn list_mail_templates(&self) -> Result<Vec<MailTemplate>, OrderMailError> {
        Ok(self.templates.list_mail_templates().await?)
    }

    async fn get_mail_history(&self, id: &Uuid) -> Result<MailHistory, GetMailHistoryError> {
        self.histories.get_mail_history_by_id(id).await
    }

    async fn get_order_mail_overview(
        &self,
        order_id: OrderId,
    ) -> Result<OrderMailOverview, OrderMailError> {
        let order = self
            .resolve_orders(&TargetOrderSet::single(order_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| OrderMailError::OrdersNotFound(vec![order_id]))?;

        let histories = self.histories.list_mail_histories_by_order(order_id).await?;
        let templates = self.templates.list_mail_templates().await?;

        Ok(OrderMailOverview {
            order,
            histories,
            templates,
        })
    }
}
