/// Surrogate primary keys (objectives, evaluation plans, items) are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (planned evaluation dates) carry no time zone.
pub type Date = chrono::NaiveDate;
