/// Backend primary keys are integer ids assigned by the server.
pub type DbId = i64;

/// Creation / modification timestamps as sent by the backend (UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Task due dates carry no time component (`YYYY-MM-DD` on the wire).
pub type DueDate = chrono::NaiveDate;
