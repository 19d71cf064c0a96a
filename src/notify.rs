use notify_rust::Notification;
use tracing::{debug, info};

use crate::error::NotifyError;

pub const APP_NAME: &str = "moveit";

/// Fire-and-forget desktop message with a pass/fail outcome
pub trait Notifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        (**self).notify(title, message)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        (**self).notify(title, message)
    }
}

/// OS notification through notify-rust
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        debug!(title, message, "sending desktop notification");
        Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(message)
            .sound_name("Glass")
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Dispatch {
                title: title.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Used with `--no-notify`: only logs
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        info!(title, message, "notification suppressed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_notifier_always_succeeds() {
        assert!(SilentNotifier.notify("Break Time", "Time for Plank").is_ok());
    }

    #[test]
    fn test_boxed_notifier_delegates() {
        let boxed: Box<dyn Notifier> = Box::new(SilentNotifier);
        assert!(boxed.notify("Time to Focus", "Good Job").is_ok());
    }

    #[test]
    fn test_dispatch_error_message() {
        let err = NotifyError::Dispatch {
            title: "Break Time".into(),
            reason: "no notification daemon".into(),
        };
        assert_eq!(
            err.to_string(),
            "notification \"Break Time\" failed: no notification daemon"
        );
    }
}
