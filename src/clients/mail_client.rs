use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use tracing::info;

/// Mail transport. Recipients are local mailbox names; the implementation
/// owns the domain they are delivered under.
pub trait Mailer {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub struct ResendMailer {
    resend: Resend,
    from: String,
    domain: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, from: String, domain: String) -> Self {
        Self {
            resend: Resend::new(api_key),
            from,
            domain,
        }
    }
}

impl Mailer for ResendMailer {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let to = [format!("{}@{}", recipient, self.domain)];
        let email = CreateEmailBaseOptions::new(&self.from, to, subject).with_text(body);
        let response = self.resend.emails.send(email).await?;
        info!("sent digest to {} with id {}", recipient, response.id);
        Ok(())
    }
}
