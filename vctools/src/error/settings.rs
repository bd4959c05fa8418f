use thiserror::Error;

use crate::core::konst::pacing::{
    WAIT_AFTER_MAX, WAIT_AFTER_MIN, WAIT_SECONDS_MAX, WAIT_SECONDS_MIN, WAIT_SECONDS_STEP,
};

#[derive(Error, Debug, PartialEq)]
pub enum ThrottleConfigError {
    #[error("`wait-after` must be within {}..={}: {}", WAIT_AFTER_MIN, WAIT_AFTER_MAX, .0)]
    WaitAfter(i64),
    #[error(
        "`wait-seconds` must be within {}..={} in steps of {}: {}",
        WAIT_SECONDS_MIN,
        WAIT_SECONDS_MAX,
        WAIT_SECONDS_STEP,
        .0
    )]
    WaitSeconds(f64),
}

#[derive(Error, Debug)]
#[error("connecting to the settings database failed: {}", .0)]
pub enum ConnectError {
    Sqlx(#[from] sqlx::Error),
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[derive(Error, Debug)]
#[error("accessing guild settings failed: {}", .0)]
pub enum StoreError {
    Sqlx(#[from] sqlx::Error),
    InvalidRow(#[from] ThrottleConfigError),
}
