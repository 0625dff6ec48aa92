use common::{
    env_config::SmtpConfig,
    error::{AppError, Res},
};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};

mod templates;

/// Outgoing mail over SMTP (STARTTLS).
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> Res<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = config
            .from_address
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid SMTP from address: {}", e)))?;

        Ok(Mailer { transport, from })
    }

    /// Verification link mail sent right after registration and on resend.
    pub async fn send_verification(&self, to: &str, first_name: &str, link: &str) -> Res<()> {
        let (text, html) = templates::verification(first_name, link);
        self.send(to, "Verify your Textopsy account", text, html)
            .await
    }

    /// Receipt + plan activation notice after a successful Pro payment.
    pub async fn send_receipt(&self, to: &str, first_name: &str, amount_kobo: i64) -> Res<()> {
        let (text, html) = templates::receipt(first_name, amount_kobo);
        self.send(to, "Your Textopsy Pro receipt", text, html).await
    }

    async fn send(&self, to: &str, subject: &str, text: String, html: String) -> Res<()> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        self.transport.send(message).await?;
        log::debug!("Sent \"{}\" to {}", subject, to);
        Ok(())
    }
}
