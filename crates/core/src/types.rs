/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier assigned to a workitem by Design Automation.
pub type WorkitemId = String;
