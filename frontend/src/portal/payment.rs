use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;

use crate::api::portal;

pub const POLL_INTERVAL_MS: u32 = 2_000;
pub const MAX_PENDING_ATTEMPTS: u32 = 30;
pub const MAX_ERROR_ATTEMPTS: u32 = 5;

/// What to do after one payment-status check.
#[derive(Clone, Debug, PartialEq)]
pub enum PollStep {
    Paid,
    Retry,
    /// Give up, optionally telling the user why.
    Stop(Option<String>),
}

pub fn after_status(status: &str, attempt: u32, start_upload: bool) -> PollStep {
    match status {
        "succeeded" => PollStep::Paid,
        "failed" | "canceled" => PollStep::Stop(Some(format!("Payment {}.", status))),
        _ if attempt < MAX_PENDING_ATTEMPTS => PollStep::Retry,
        _ if start_upload => PollStep::Stop(None),
        _ => PollStep::Stop(Some("Payment still pending. Please refresh in a moment.".to_string())),
    }
}

pub fn after_error(attempt: u32, start_upload: bool) -> PollStep {
    if attempt < MAX_ERROR_ATTEMPTS {
        PollStep::Retry
    } else if start_upload {
        PollStep::Stop(None)
    } else {
        PollStep::Stop(Some("Unable to verify payment status.".to_string()))
    }
}

/// Session id to poll for, present only on a successful Stripe return.
pub fn session_to_poll(session_id: Option<&str>, paid: Option<&str>) -> Option<String> {
    match (session_id, paid) {
        (Some(sid), Some("1")) if !sid.is_empty() => Some(sid.to_string()),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaymentOutcome {
    Paid,
    Stopped(Option<String>),
    Cancelled,
}

/// Polls the payment status until a terminal answer, the attempt caps, or
/// `cancelled` is raised.
pub async fn poll_payment(session_id: String, start_upload: bool, cancelled: Rc<Cell<bool>>) -> PaymentOutcome {
    let mut attempt = 0;
    loop {
        let result = portal::payment_status(&session_id).await;
        if cancelled.get() {
            return PaymentOutcome::Cancelled;
        }
        let step = match result {
            Ok(status) => {
                log::info!("Payment status for {}: {}", session_id, status.status);
                after_status(&status.status, attempt, start_upload)
            }
            Err(e) => {
                log::error!("Payment status check failed: {}", e);
                after_error(attempt, start_upload)
            }
        };
        match step {
            PollStep::Paid => return PaymentOutcome::Paid,
            PollStep::Stop(message) => return PaymentOutcome::Stopped(message),
            PollStep::Retry => {
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if cancelled.get() {
                    return PaymentOutcome::Cancelled;
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_is_terminal() {
        assert_eq!(after_status("succeeded", 0, false), PollStep::Paid);
        assert_eq!(after_status("succeeded", 29, true), PollStep::Paid);
    }

    #[test]
    fn failure_statuses_stop_with_message() {
        assert_eq!(after_status("failed", 3, true), PollStep::Stop(Some("Payment failed.".into())));
        assert_eq!(after_status("canceled", 0, false), PollStep::Stop(Some("Payment canceled.".into())));
    }

    #[test]
    fn pending_retries_until_thirty_attempts() {
        assert_eq!(after_status("processing", 0, false), PollStep::Retry);
        assert_eq!(after_status("requires_payment_method", 29, false), PollStep::Retry);
        assert_eq!(
            after_status("processing", 30, false),
            PollStep::Stop(Some("Payment still pending. Please refresh in a moment.".into()))
        );
        assert_eq!(after_status("processing", 30, true), PollStep::Stop(None));
    }

    #[test]
    fn errors_retry_five_times() {
        assert_eq!(after_error(0, false), PollStep::Retry);
        assert_eq!(after_error(4, false), PollStep::Retry);
        assert_eq!(after_error(5, false), PollStep::Stop(Some("Unable to verify payment status.".into())));
        assert_eq!(after_error(5, true), PollStep::Stop(None));
    }

    #[test]
    fn polls_only_after_paid_return() {
        assert_eq!(session_to_poll(Some("cs_1"), Some("1")), Some("cs_1".into()));
        assert_eq!(session_to_poll(Some("cs_1"), Some("0")), None);
        assert_eq!(session_to_poll(None, Some("1")), None);
        assert_eq!(session_to_poll(Some(""), Some("1")), None);
    }
}
