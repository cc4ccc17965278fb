use async_trait::async_trait;

/// Outbound text messages.
#[async_trait]
pub trait SmsGateway: Send + Sync {
	async fn send(&self, number: &str, message: &str) -> anyhow::Result<()>;
}

/// Logs each dispatch instead of contacting a carrier. The message body
/// carries codes and is never written out.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSmsGateway;

#[async_trait]
impl SmsGateway for LogSmsGateway {
	async fn send(&self, number: &str, _message: &str) -> anyhow::Result<()> {
		tracing::info!(number, "sms dispatched");
		Ok(())
	}
}
