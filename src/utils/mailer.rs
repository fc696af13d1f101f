use lettre::message::{header, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;
use crate::utils::errors::ApiError;

/// Outbound SMTP mailer. Sending only hands the message to the relay;
/// delivery is not confirmed end-to-end.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_relay)?
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_pass.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.email_from.parse()?,
        })
    }

    pub async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), ApiError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(html.to_string())?;

        self.transport.send(message).await?;
        Ok(())
    }

    pub async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        valid_minutes: u64,
    ) -> Result<(), ApiError> {
        self.send_html(
            to,
            "Vérification de votre adresse email",
            &verification_email_html(code, valid_minutes),
        )
        .await
    }
}

/// Fixed template for the verification email.
pub fn verification_email_html(code: &str, valid_minutes: u64) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2 style="color: #2563eb;">Vérification de votre adresse email</h2>
  <p>Merci de votre inscription ! Pour continuer, veuillez utiliser le code de vérification ci-dessous :</p>
  <div style="background-color: #f3f4f6; padding: 15px; border-radius: 5px; text-align: center; font-size: 24px; letter-spacing: 5px; font-weight: bold;">
    {code}
  </div>
  <p>Ce code est valable pendant {valid_minutes} minutes.</p>
  <p>Si vous n'avez pas demandé ce code, vous pouvez ignorer cet email.</p>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_embeds_code_and_validity_window() {
        let html = verification_email_html("428613", 10);
        assert!(html.contains("428613"));
        assert!(html.contains("10 minutes"));
        assert!(html.contains("Vérification de votre adresse email"));
    }

    #[test]
    fn mailer_builds_from_default_config() {
        let config = Config::from_env();
        assert!(Mailer::from_config(&config).is_ok());
    }
}
