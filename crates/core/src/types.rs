/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (due dates, payment dates) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Monetary amounts in minor units (centavos). Never a float.
pub type Cents = i64;
