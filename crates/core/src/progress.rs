//! Step indicator shown next to each notification status.

use serde::Serialize;

use crate::workitem::NotificationStatus;

/// Percentage and caption for the export progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub percent: u8,
    pub message: &'static str,
}

impl ProgressStep {
    pub fn for_status(status: NotificationStatus) -> Self {
        let (percent, message) = match status {
            NotificationStatus::Started => (20, "Step 1/4: Uploading input parameters"),
            NotificationStatus::Pending => (40, "Step 2/4: Running Design Automation"),
            NotificationStatus::Success => (80, "Step 3/4: Creating download link"),
            NotificationStatus::Completed => (100, "Step 4/4: Done, ready to download"),
            NotificationStatus::Failed => (0, "Failed to export FBXs"),
            NotificationStatus::Cancelled => (0, "The operation is cancelled"),
        };
        Self { percent, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_advance_monotonically_until_done() {
        let order = [
            NotificationStatus::Started,
            NotificationStatus::Pending,
            NotificationStatus::Success,
            NotificationStatus::Completed,
        ];
        let percents: Vec<u8> = order
            .iter()
            .map(|s| ProgressStep::for_status(*s).percent)
            .collect();
        assert_eq!(percents, vec![20, 40, 80, 100]);
    }

    #[test]
    fn failure_and_cancel_reset_the_bar() {
        assert_eq!(ProgressStep::for_status(NotificationStatus::Failed).percent, 0);
        assert_eq!(
            ProgressStep::for_status(NotificationStatus::Cancelled).message,
            "The operation is cancelled"
        );
    }
}
