use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Email delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Fronteira com o serviço de email. O `AuthService` só conhece este trait;
/// o transporte real (SMTP ou equivalente) entra por injeção no deploy.
pub trait Mailer: Send + Sync {
    /// Envia e retorna um id de entrega. Falha sobe para o chamador; não há
    /// retentativa nesta camada.
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, MailerError>;
}

/// Implementação padrão: registra a mensagem no log e devolve um id gerado.
/// Serve para desenvolvimento e para ambientes sem transporte configurado.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, MailerError> {
        let delivery_id = Uuid::new_v4().to_string();

        tracing::info!(
            %delivery_id,
            to,
            subject,
            body_len = body.len(),
            "Email delivered to log transport"
        );

        Ok(delivery_id)
    }
}
