//! Hand-off of accepted submissions to whoever delivers them.
//!
//! Submissions are broadcast as [`SubmissionReceived`]; the form never waits on delivery. The
//! built-in worker only logs, matching a venue without a transport yet.

use crate::error::{BookingError, BookingErrorExt};
use crate::submission::{FormSubmission, SubmissionReceived};
use castellan_event_bus::{EventBus, EventReceiverExt};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Publishes a submission. Returns how many delivery workers received it.
///
/// # Errors
/// Returns [`BookingError::Delivery`] if the bus refuses the event.
pub fn publish(events: &EventBus, submission: FormSubmission) -> Result<usize, BookingError> {
    let id = submission.id.clone();
    let receivers = events
        .publish(SubmissionReceived(submission))
        .context("Failed to publish submission")?;

    if receivers == 0 {
        debug!(submission = %id, "Submission published with no delivery worker attached");
    }
    Ok(receivers)
}

/// Spawns the logging delivery worker.
///
/// The worker subscribes before this returns, so nothing published afterwards is missed. It
/// stops when the bus shuts down and yields the number of submissions it handled.
///
/// # Errors
/// Returns [`BookingError::Delivery`] if the submission channel cannot be subscribed.
pub fn spawn_logger(events: &EventBus) -> Result<JoinHandle<usize>, BookingError> {
    let mut rx = events
        .subscribe::<SubmissionReceived>()
        .context("Failed to subscribe delivery worker")?;

    Ok(tokio::spawn(async move {
        let mut handled = 0usize;
        while let Some(event) = rx.next_event().await {
            let SubmissionReceived(submission) = event.as_ref();
            info!(
                submission = %submission.id,
                form = %submission.form,
                fields = submission.fields.len(),
                submitted_at = %submission.submitted_at,
                "Submission received"
            );
            for (name, value) in submission.fields.iter() {
                debug!(submission = %submission.id, field = name, value = %value, "Submission field");
            }
            handled += 1;
        }
        info!(handled, "Delivery worker stopped");
        handled
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FormKind;
    use crate::validate::FormFields;
    use chrono::Utc;

    #[tokio::test]
    async fn worker_handles_published_submissions_until_shutdown() {
        let bus = EventBus::new();
        let worker = spawn_logger(&bus).unwrap();

        let submission = FormSubmission::new(FormKind::Restaurant, FormFields::default(), Utc::now());
        assert_eq!(publish(&bus, submission.clone()).unwrap(), 1);
        assert_eq!(publish(&bus, submission).unwrap(), 1);

        tokio::task::yield_now().await;
        bus.shutdown();
        assert_eq!(worker.await.unwrap(), 2);
    }

    #[test]
    fn publishing_without_a_worker_is_not_an_error() {
        let bus = EventBus::new();
        let submission = FormSubmission::new(FormKind::Events, FormFields::default(), Utc::now());
        assert_eq!(publish(&bus, submission).unwrap(), 0);
    }
}
