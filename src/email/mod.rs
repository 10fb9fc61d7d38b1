//! Email Delivery Module
//!
//! Best-effort outbound email over SMTP (lettre). The mailer is a
//! collaborator, not a dependency: a delivery failure is logged and
//! swallowed, and the triggering operation still succeeds, because
//! the token it refers to was durably created regardless of transport
//! outcome.
//!
//! When SMTP is not configured the mailer is disabled and sends are
//! logged as skipped, which keeps local development and tests working
//! without a relay.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::server::config::SmtpConfig;

/// Outbound email collaborator
///
/// Cheap to clone; clones share one SMTP transport.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<String>,
    base_url: String,
}

impl Mailer {
    /// Build a mailer from optional SMTP settings
    ///
    /// A bad relay hostname disables the mailer rather than failing
    /// startup; delivery is best-effort by design.
    pub fn from_config(smtp: Option<&SmtpConfig>, base_url: &str) -> Self {
        let (transport, from) = match smtp {
            Some(config) => {
                match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host) {
                    Ok(builder) => {
                        let transport = builder
                            .credentials(Credentials::new(
                                config.username.clone(),
                                config.password.clone(),
                            ))
                            .build();
                        (Some(transport), Some(config.from.clone()))
                    }
                    Err(e) => {
                        tracing::error!("Failed to build SMTP transport: {:?}", e);
                        (None, None)
                    }
                }
            }
            None => (None, None),
        };

        Self {
            transport,
            from,
            base_url: base_url.to_string(),
        }
    }

    /// Whether a transport is configured
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send the registration-verification email
    ///
    /// The link embeds the opaque token; the token is the sole secret
    /// needed to finish registration.
    pub async fn send_verification_email(&self, to: &str, token: &str) {
        let link = verification_link(&self.base_url, token);
        let body = verification_body(&link);
        self.send(to, "Confirm your registration", body).await;
    }

    /// Send the password-reset email
    pub async fn send_password_reset_email(&self, to: &str, token: &str) {
        let link = reset_link(&self.base_url, token);
        let body = reset_body(&link);
        self.send(to, "Password reset request", body).await;
    }

    /// Send an HTML email, logging (not propagating) any failure
    async fn send(&self, to: &str, subject: &str, body: String) {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::info!("Mailer disabled; skipping email to {} ({})", to, subject);
            return;
        };

        let message = Message::builder()
            .from(match from.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    tracing::error!("Invalid From address {:?}: {:?}", from, e);
                    return;
                }
            })
            .to(match to.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    tracing::error!("Invalid recipient address {:?}: {:?}", to, e);
                    return;
                }
            })
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body);

        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("Failed to build email: {:?}", e);
                return;
            }
        };

        match transport.send(message).await {
            Ok(_) => tracing::info!("Email sent to {} ({})", to, subject),
            Err(e) => tracing::error!("Failed to send email to {}: {:?}", to, e),
        }
    }
}

/// Verification link embedding the opaque token
fn verification_link(base_url: &str, token: &str) -> String {
    format!("{}/auth/verify_email?token={}", base_url, token)
}

/// Reset link embedding the opaque token
fn reset_link(base_url: &str, token: &str) -> String {
    format!("{}/user/reset-password?token={}", base_url, token)
}

fn verification_body(link: &str) -> String {
    format!(
        r#"<html>
    <body>
        <p>Welcome!</p>
        <p>Please confirm your email address by following the link below:</p>
        <p><a href="{link}">Click here to confirm your registration</a></p>
        <p>The link is valid for 30 minutes.</p>
    </body>
</html>"#
    )
}

fn reset_body(link: &str) -> String {
    format!(
        r#"<html>
    <body>
        <p>You requested a password reset.</p>
        <p>Please follow the link below to reset your password:</p>
        <p><a href="{link}">Click here to reset your password</a></p>
        <p>This link will be valid for 30 minutes.</p>
        <p>If you did not request a password reset, simply ignore this email.</p>
    </body>
</html>"#
    )
}
