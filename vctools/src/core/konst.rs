pub mod pacing {
    use vctools_ext::num::range::SteppedRange;

    pub const WAIT_AFTER_MIN: u8 = 1;
    pub const WAIT_AFTER_MAX: u8 = 20;
    pub const WAIT_AFTER_DEFAULT: u8 = 5;

    pub const WAIT_SECONDS_MIN: f64 = 1.;
    pub const WAIT_SECONDS_MAX: f64 = 10.;
    pub const WAIT_SECONDS_STEP: f64 = 0.5;
    pub const WAIT_SECONDS_DEFAULT: f64 = 2.;

    #[inline]
    pub fn wait_seconds_range() -> SteppedRange {
        SteppedRange::new(WAIT_SECONDS_MIN, WAIT_SECONDS_MAX, WAIT_SECONDS_STEP)
    }
}

pub mod discord {
    pub const SELECT_MENU_OPTIONS_LIMIT: usize = 25;
    pub const SELECT_MENU_OPTION_LABEL_LIMIT: usize = 100;
    pub const SELECT_MENU_PLACEHOLDER_LIMIT: usize = 150;
}

pub mod exit_code {
    /// A harmless notice, confirming something the user might have meant to do
    pub const NOTICE: &str = "❕";
    /// Invalid command usage, implying unmet conditions
    pub const INVALID: &str = "❌";
    /// Other known errors
    pub const KNOWN_ERROR: &str = "‼️";
}

pub mod text {
    pub const UNNAMED_CHANNEL: &str = "(Unnamed Channel)";
    pub const NO_CHANGES_MESSAGE: &str = "🔐 No changes were made.";
}
