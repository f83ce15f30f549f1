//! Email service for contact form notifications.
//!
//! Supports two backends:
//! - `console`: Logs emails to the application log (development)
//! - `smtp`: Sends via SMTP server

use crate::config::EmailConfig;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    ///
    /// The SMTP transport is built eagerly so a malformed host fails at
    /// startup rather than on the first contact submission.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mailer = match config.backend.as_str() {
            "smtp" => Some(build_smtp_transport(&config)?),
            "console" => None,
            backend => {
                error!(backend = %backend, "Unknown email backend");
                return Err(EmailError::NotConfigured);
            }
        };

        Ok(Self {
            config: Arc::new(config),
            mailer,
        })
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        match &self.mailer {
            None => self.send_console(message),
            Some(mailer) => self.send_smtp(mailer, message).await,
        }
    }

    /// Send a notification about a contact form submission to the site
    /// operator mailbox.
    pub async fn send_contact_notification(
        &self,
        sender_name: &str,
        sender_email: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let message = EmailMessage {
            to: self.config.default_from.clone(),
            subject: format!("Contact form message from {}", sender_name),
            body_text: format!(
                "Name: {name}\nEmail: {email}\n\n{body}\n",
                name = sender_name,
                email = sender_email,
                body = body
            ),
        };
        self.send(message).await
    }

    /// Console backend - logs email to the application log.
    fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.default_from,
            body = %message.body_text,
            "Email (console backend)"
        );
        Ok(())
    }

    /// SMTP backend - sends via the configured SMTP server.
    async fn send_smtp(
        &self,
        mailer: &AsyncSmtpTransport<Tokio1Executor>,
        message: EmailMessage,
    ) -> Result<(), EmailError> {
        let from: Mailbox = self
            .config
            .default_from
            .parse()
            .map_err(|_| EmailError::InvalidAddress(self.config.default_from.clone()))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|_| EmailError::InvalidAddress(message.to.clone()))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .body(message.body_text)
            .map_err(|e| EmailError::SendFailed(format!("Failed to build message: {}", e)))?;

        mailer
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(format!("SMTP send failed: {}", e)))?;

        info!(
            to = %message.to,
            subject = %message.subject,
            "Email sent via SMTP"
        );
        Ok(())
    }
}

fn build_smtp_transport(
    config: &EmailConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
    if config.host.is_empty() {
        return Err(EmailError::NotConfigured);
    }

    let builder = if config.use_tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| EmailError::SendFailed(format!("Invalid SMTP host: {}", e)))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
    };

    let mut builder = builder.port(config.port);
    if !config.host_user.is_empty() {
        builder = builder.credentials(Credentials::new(
            config.host_user.clone(),
            config.host_password.clone(),
        ));
    }

    Ok(builder.build())
}
