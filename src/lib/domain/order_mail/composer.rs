//! Turns a template, per-send overrides and one order into a ready-to-send message

use askama::Template;
use serde::Serialize;

use crate::domain::{
    communication::{email_addresses::EmailAddress, mailer::Message},
    mail_templates::MailTemplate,
    orders::{Order, OrderId},
};

use super::{errors::ComposeError, CompositionOverride};

/// Order details section placed between the header and footer
#[derive(Debug, Template)]
#[template(path = "emails/orders/order_details.txt")]
pub struct OrderDetailsTemplate<'a> {
    /// The order being described
    pub order: &'a Order,
}

/// A fully resolved message for one order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComposedMessage {
    /// The order this message is about
    pub order_id: OrderId,

    /// The order's customer email
    pub to: EmailAddress,

    /// Subject, prefixed with the shop name
    pub subject: String,

    /// Header, order details and footer
    pub body: String,
}

impl From<&ComposedMessage> for Message {
    fn from(message: &ComposedMessage) -> Self {
        Message {
            to: message.to.clone(),
            from: None,
            subject: message.subject.clone(),
            body: message.body.clone(),
        }
    }
}

/// Composes order mail from a template and its overrides
#[derive(Debug, Clone, Copy)]
pub struct MessageComposer<'a> {
    template: &'a MailTemplate,
    overrides: &'a CompositionOverride,
    shop_name: &'a str,
}

impl<'a> MessageComposer<'a> {
    /// Create a new composer
    pub fn new(
        template: &'a MailTemplate,
        overrides: &'a CompositionOverride,
        shop_name: &'a str,
    ) -> Self {
        Self {
            template,
            overrides,
            shop_name,
        }
    }

    /// The subject shared by every message, `"[{shop_name}] {subject}"`
    pub fn subject(&self) -> String {
        format!(
            "[{}] {}",
            self.shop_name,
            self.overrides.subject_or(&self.template.subject)
        )
    }

    /// Compose the message for `order`.
    ///
    /// # Errors
    /// [`ComposeError::MissingRecipient`] when the order has no customer email.
    pub fn compose(&self, order: &Order) -> Result<ComposedMessage, ComposeError> {
        let to = order
            .email
            .clone()
            .ok_or(ComposeError::MissingRecipient(order.id))?;

        let details = OrderDetailsTemplate { order }.render()?;

        let body = [
            self.overrides.header_or(&self.template.header),
            details.trim_end(),
            self.overrides.footer_or(&self.template.footer),
        ]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

        Ok(ComposedMessage {
            order_id: order.id,
            to,
            subject: self.subject(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{
        mail_templates::tests::mail_template_fixture,
        orders::{tests::order_fixture, OrderItem},
    };

    use super::*;

    #[test]
    fn test_blank_override_uses_template_defaults() -> TestResult {
        let template = mail_template_fixture();
        let order = order_fixture(1);

        let composed =
            MessageComposer::new(&template, &CompositionOverride::default(), "ShopX")
                .compose(&order)?;

        assert_eq!(composed.subject, "[ShopX] Thank you for your order");
        assert!(composed.body.starts_with("Thank you for shopping with us.\n\n"));
        assert!(composed
            .body
            .ends_with("\n\nWe look forward to serving you again."));

        Ok(())
    }

    #[test]
    fn test_blank_override_matches_override_equal_to_template() -> TestResult {
        let template = mail_template_fixture();
        let order = order_fixture(1);

        let explicit = CompositionOverride {
            subject: template.subject.clone(),
            header: template.header.clone(),
            footer: template.footer.clone(),
        };

        let from_defaults =
            MessageComposer::new(&template, &CompositionOverride::default(), "ShopX")
                .compose(&order)?;
        let from_explicit = MessageComposer::new(&template, &explicit, "ShopX").compose(&order)?;

        assert_eq!(from_defaults, from_explicit);

        Ok(())
    }

    #[test]
    fn test_override_fields_are_independent() -> TestResult {
        let template = mail_template_fixture();
        let order = order_fixture(1);

        let overrides = CompositionOverride {
            subject: String::new(),
            header: "Your parcel is on its way.".to_string(),
            footer: String::new(),
        };

        let composed = MessageComposer::new(&template, &overrides, "ShopX").compose(&order)?;

        assert_eq!(composed.subject, "[ShopX] Thank you for your order");
        assert!(composed.body.starts_with("Your parcel is on its way.\n\n"));
        assert!(!composed.body.contains("Thank you for shopping with us."));
        assert!(composed
            .body
            .ends_with("We look forward to serving you again."));

        Ok(())
    }

    #[test]
    fn test_subject_override_replaces_template_subject() -> TestResult {
        let template = mail_template_fixture();
        let overrides = CompositionOverride {
            subject: "Hello".to_string(),
            ..Default::default()
        };

        let composed =
            MessageComposer::new(&template, &overrides, "ShopX").compose(&order_fixture(3))?;

        assert_eq!(composed.subject, "[ShopX] Hello");

        Ok(())
    }

    #[test]
    fn test_body_contains_order_details() -> TestResult {
        let template = mail_template_fixture();
        let mut order = order_fixture(12);
        order.items.push(OrderItem {
            product_name: "Green Tea".to_string(),
            quantity: 1,
            price: 400,
        });
        order.payment_total = 3_400;

        let composed = MessageComposer::new(&template, &CompositionOverride::default(), "ShopX")
            .compose(&order)?;

        assert!(composed.body.contains("Order No.: 000012"));
        assert!(composed.body.contains("Customer: Hanako Yamada"));
        assert!(composed.body.contains("Order date: 2024-09-01 10:30"));
        assert!(composed.body.contains("Chocolate Cake x 2: 3000"));
        assert!(composed.body.contains("Green Tea x 1: 400"));
        assert!(composed.body.contains("Total: 3400"));

        Ok(())
    }

    #[test]
    fn test_recipient_and_order_id_come_from_order() -> TestResult {
        let template = mail_template_fixture();
        let order = order_fixture(8);

        let composed = MessageComposer::new(&template, &CompositionOverride::default(), "ShopX")
            .compose(&order)?;

        assert_eq!(composed.order_id, OrderId::new(8));
        assert_eq!(composed.to.as_str(), "customer8@example.com");

        Ok(())
    }

    #[test]
    fn test_order_without_email_is_rejected() {
        let template = mail_template_fixture();
        let mut order = order_fixture(4);
        order.email = None;

        let result =
            MessageComposer::new(&template, &CompositionOverride::default(), "ShopX").compose(&order);

        assert!(matches!(
            result,
            Err(ComposeError::MissingRecipient(id)) if id == OrderId::new(4)
        ));
    }

    #[test]
    fn test_compose_does_not_modify_order() -> TestResult {
        let template = mail_template_fixture();
        let order = order_fixture(2);
        let before = order.clone();

        MessageComposer::new(&template, &CompositionOverride::default(), "ShopX").compose(&order)?;

        assert_eq!(order, before);

        Ok(())
    }

    #[test]
    fn test_message_from_composed_message() -> TestResult {
        let template = mail_template_fixture();
        let composed = MessageComposer::new(&template, &CompositionOverride::default(), "ShopX")
            .compose(&order_fixture(5))?;

        let message = Message::from(&composed);

        assert_eq!(message.to, composed.to);
        assert_eq!(message.from, None);
        assert_eq!(message.subject, composed.subject);
        assert_eq!(message.body, composed.body);

        Ok(())
    }
}
