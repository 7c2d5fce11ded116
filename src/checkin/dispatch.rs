//! Delivery of summary records to the check-in webhook.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::errors::DeliveryError;
use super::summary::SummaryRecord;

/// Production webhook receiving weekly check-ins.
pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.ms.increff.com/webhook/weekly-checkin";

/// Upper bound for a single delivery attempt.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Confirmation of a delivered summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the webhook.
    pub status: u16,
}

/// Posts summary records to a fixed webhook URL.
pub struct WebhookDispatcher {
    client: Client,
    url: Url,
}

impl WebhookDispatcher {
    /// Create a dispatcher for `url` with the standard delivery timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self { client, url })
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// POST the summary as JSON.
    ///
    /// # Errors
    /// Returns a [`DeliveryError`] carrying the summary on transport failure
    /// or a non-success status.
    pub async fn deliver(&self, summary: &SummaryRecord) -> Result<DeliveryReceipt, DeliveryError> {
        debug!(url = %self.url, ?summary, "sending summary to webhook");

        let response = match self.client.post(self.url.clone()).json(summary).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Webhook error: {e}");
                return Err(failure(e.to_string(), None, summary));
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        info!(status = status.as_u16(), "Webhook response received");
        debug!(body = %body, "Webhook response body");

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "Webhook rejected summary");
            return Err(failure(
                format!("webhook returned status {status}"),
                Some(status.as_u16()),
                summary,
            ));
        }

        Ok(DeliveryReceipt {
            status: status.as_u16(),
        })
    }
}

fn failure(message: String, status: Option<u16>, summary: &SummaryRecord) -> DeliveryError {
    DeliveryError {
        message,
        status,
        summary: Box::new(summary.clone()),
    }
}
