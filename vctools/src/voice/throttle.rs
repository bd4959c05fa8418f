use std::{
    fmt::Display,
    future::Future,
    num::{NonZeroU8, NonZeroUsize},
    time::Duration,
};

use crate::{
    core::konst::pacing::{
        WAIT_AFTER_DEFAULT, WAIT_AFTER_MAX, WAIT_AFTER_MIN, WAIT_SECONDS_DEFAULT,
        wait_seconds_range,
    },
    error::settings::ThrottleConfigError,
};

/// How many requests may settle before the runner pauses again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitAfter(NonZeroU8);

impl WaitAfter {
    pub fn new(value: i64) -> Result<Self, ThrottleConfigError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (WAIT_AFTER_MIN..=WAIT_AFTER_MAX).contains(v))
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(ThrottleConfigError::WaitAfter(value))
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for WaitAfter {
    fn default() -> Self {
        Self(NonZeroU8::new(WAIT_AFTER_DEFAULT).unwrap_or(NonZeroU8::MIN))
    }
}

/// The pause length, stored as its marker index on the `wait-seconds` slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitSeconds(u16);

impl WaitSeconds {
    pub fn new(value: f64) -> Result<Self, ThrottleConfigError> {
        wait_seconds_range()
            .index_of(value)
            .map(Self)
            .ok_or(ThrottleConfigError::WaitSeconds(value))
    }

    pub fn from_half_seconds(half_seconds: i16) -> Result<Self, ThrottleConfigError> {
        Self::new(f64::from(half_seconds) / 2.)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn half_seconds(self) -> i16 {
        (self.as_secs_f64() * 2.).round() as i16
    }

    pub fn as_secs_f64(self) -> f64 {
        wait_seconds_range().nth(self.0)
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.as_secs_f64())
    }
}

impl Default for WaitSeconds {
    fn default() -> Self {
        Self(wait_seconds_range().index_of(WAIT_SECONDS_DEFAULT).unwrap_or_default())
    }
}

impl Display for WaitSeconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.as_secs_f64())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PacingMode {
    /// Every request is sent at once and only their results are awaited with pauses in between.
    #[default]
    Observe,
    /// Requests are sent one after another, pausing between them.
    Issue,
}

impl PacingMode {
    pub const fn from_issue_paced(issue_paced: bool) -> Self {
        if issue_paced { Self::Issue } else { Self::Observe }
    }

    pub const fn is_issue_paced(self) -> bool {
        matches!(self, Self::Issue)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Observe => "observe",
            Self::Issue => "issue",
        }
    }
}

impl Display for PacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub wait_after: WaitAfter,
    pub wait_seconds: WaitSeconds,
    pub pacing: PacingMode,
}

impl ThrottleConfig {
    pub fn pace(self) -> Pace {
        Pace::new(
            NonZeroUsize::from(self.wait_after.0),
            self.wait_seconds.as_duration(),
        )
    }
}

impl Display for ThrottleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pausing for **{}** after every **{}** request(s), pacing: `{}`",
            self.wait_seconds,
            self.wait_after.get(),
            self.pacing,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrottleConfigPatch {
    pub wait_after: Option<WaitAfter>,
    pub wait_seconds: Option<WaitSeconds>,
    pub pacing: Option<PacingMode>,
}

impl ThrottleConfigPatch {
    pub const fn is_empty(&self) -> bool {
        self.wait_after.is_none() && self.wait_seconds.is_none() && self.pacing.is_none()
    }

    #[must_use]
    pub fn apply(self, config: ThrottleConfig) -> ThrottleConfig {
        ThrottleConfig {
            wait_after: self.wait_after.unwrap_or(config.wait_after),
            wait_seconds: self.wait_seconds.unwrap_or(config.wait_seconds),
            pacing: self.pacing.unwrap_or(config.pacing),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pace {
    every: NonZeroUsize,
    pause: Duration,
}

impl Pace {
    pub const fn new(every: NonZeroUsize, pause: Duration) -> Self {
        Self { every, pause }
    }

    /// Index `0` always pauses.
    pub const fn pauses_after(self, index: usize) -> bool {
        index % self.every.get() == 0
    }

    async fn after(self, index: usize) {
        if self.pauses_after(index) {
            tracing::trace!("pausing for {:?} after operation #{index}", self.pause);
            tokio::time::sleep(self.pause).await;
        }
    }
}

/// Awaits operations that are already in flight in order, pausing after every `pace.every`-th one.
///
/// The first failure is returned immediately. Operations not yet awaited are dropped, which does
/// not stop them if they were spawned.
pub async fn run_paced<T, E>(
    pending: impl IntoIterator<Item = impl Future<Output = Result<T, E>>>,
    pace: Pace,
) -> Result<Vec<T>, E> {
    let pending = pending.into_iter();
    let mut settled = Vec::with_capacity(pending.size_hint().0);
    for (index, operation) in pending.enumerate() {
        settled.push(operation.await?);
        pace.after(index).await;
    }
    Ok(settled)
}

/// Starts each operation only once the previous one settled and its pause elapsed.
///
/// Operations after the first failure are never started.
pub async fn run_issued<T, E, F, Fut>(
    operations: impl IntoIterator<Item = F>,
    pace: Pace,
) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let operations = operations.into_iter();
    let mut settled = Vec::with_capacity(operations.size_hint().0);
    for (index, operation) in operations.enumerate() {
        settled.push(operation().await?);
        pace.after(index).await;
    }
    Ok(settled)
}
