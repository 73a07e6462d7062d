//! Mock payment gateway for development and testing.
//!
//! The booking flow only needs a redirect URL for a hosted payment page. In
//! production this would be a real payment provider integration.

use crate::error::PaymentError;
use crate::state::BookingSubmission;
use crate::types::Money;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Payment gateway result
pub type GatewayResult<T> = Result<T, PaymentError>;

/// Hosted payment session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRedirect {
    /// Gateway session identifier
    pub session_id: String,
    /// Page the user is sent to
    pub url: String,
    /// Amount the session charges
    pub amount: Money,
}

/// Payment gateway trait
pub trait PaymentGateway: Send + Sync {
    /// Create a payment session for a submission
    ///
    /// # Errors
    ///
    /// Returns error if the gateway refuses or cannot be reached
    fn initiate_payment(
        &self,
        submission: &BookingSubmission,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<PaymentRedirect>> + Send>>;
}

/// Mock payment gateway
///
/// Returns a redirect under the configured setup URL, unless built with
/// [`MockPaymentGateway::declining`] or [`MockPaymentGateway::unreachable`].
#[derive(Clone, Debug)]
pub struct MockPaymentGateway {
    setup_url: String,
    failure: Option<PaymentError>,
}

impl MockPaymentGateway {
    /// Creates a gateway that accepts every non-zero amount
    #[must_use]
    pub fn new(setup_url: impl Into<String>) -> Self {
        Self {
            setup_url: setup_url.into(),
            failure: None,
        }
    }

    /// Creates a gateway that declines every request
    #[must_use]
    pub fn declining(setup_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            setup_url: setup_url.into(),
            failure: Some(PaymentError::Declined {
                reason: reason.into(),
            }),
        }
    }

    /// Creates a gateway that cannot be reached
    #[must_use]
    pub fn unreachable(setup_url: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            setup_url: setup_url.into(),
            failure: Some(PaymentError::Unavailable(cause.into())),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn PaymentGateway> {
        Arc::new(self)
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn initiate_payment(
        &self,
        submission: &BookingSubmission,
    ) -> Pin<Box<dyn Future<Output = GatewayResult<PaymentRedirect>> + Send>> {
        let amount = submission.total;
        let venue_id = submission.venue_id.clone();
        let setup_url = self.setup_url.clone();
        let failure = self.failure.clone();

        Box::pin(async move {
            if let Some(error) = failure {
                tracing::warn!(%venue_id, %amount, %error, "Mock payment refused");
                return Err(error);
            }

            if amount.is_zero() {
                return Err(PaymentError::ZeroAmount);
            }

            let session_id = format!("mock_session_{}", uuid::Uuid::new_v4());
            let separator = if setup_url.contains('?') { '&' } else { '?' };
            let url = format!("{setup_url}{separator}session={session_id}");

            tracing::info!(
                %venue_id,
                amount = amount.rupees(),
                session_id = %session_id,
                "Mock payment session created"
            );

            Ok(PaymentRedirect {
                session_id,
                url,
                amount,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceBreakdown;
    use crate::types::VenueId;
    use chrono::{DateTime, Utc};

    fn submission(total: u64) -> BookingSubmission {
        BookingSubmission {
            venue_id: VenueId::new("m-1"),
            dates: Vec::new(),
            address: "12 Temple Road".to_string(),
            photography: None,
            catering: None,
            rooms: None,
            breakdown: PriceBreakdown::default(),
            total: Money::from_rupees(total),
            submitted_at: DateTime::<Utc>::default(),
        }
    }

    #[tokio::test]
    async fn test_redirect_under_setup_url() {
        let gateway = MockPaymentGateway::new("https://pay.local/setup");

        let redirect = gateway.initiate_payment(&submission(85_000)).await;

        let redirect = redirect.map_err(|e| e.to_string());
        assert!(matches!(
            &redirect,
            Ok(r) if r.url.starts_with("https://pay.local/setup?session=mock_session_")
                && r.amount == Money::from_rupees(85_000)
        ));
    }

    #[tokio::test]
    async fn test_zero_amount_refused() {
        let gateway = MockPaymentGateway::new("https://pay.local/setup");
        assert_eq!(
            gateway.initiate_payment(&submission(0)).await,
            Err(PaymentError::ZeroAmount)
        );
    }

    #[tokio::test]
    async fn test_session_appended_to_existing_query() {
        let gateway = MockPaymentGateway::new("https://pay.local/setup?merchant=lotus");

        let redirect = gateway.initiate_payment(&submission(85_000)).await;

        let url = redirect.map(|r| r.url).unwrap_or_default();
        assert!(
            url.starts_with("https://pay.local/setup?merchant=lotus&session=mock_session_"),
            "{url}"
        );
        assert_eq!(url.matches('?').count(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_gateway() {
        let gateway = MockPaymentGateway::unreachable("https://pay.local/setup", "offline");
        assert_eq!(
            gateway.initiate_payment(&submission(1_000)).await,
            Err(PaymentError::Unavailable("offline".to_string()))
        );
    }

    #[tokio::test]
    async fn test_declining_gateway() {
        let gateway = MockPaymentGateway::declining("https://pay.local/setup", "card network down");
        assert_eq!(
            gateway.initiate_payment(&submission(1_000)).await,
            Err(PaymentError::Declined {
                reason: "card network down".to_string()
            })
        );
    }
}
