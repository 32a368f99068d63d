use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

/// Roster changes close this many calendar days before the competition date.
pub const BLACKOUT_DAYS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegistrationWindow {
    pub is_past_event: bool,
    pub can_modify: bool,
}

impl RegistrationWindow {
    pub fn registration_permitted(&self) -> bool {
        !self.is_past_event && self.can_modify
    }

    pub fn withdrawal_permitted(&self) -> bool {
        self.can_modify
    }
}

/// Window state of a competition held on `competition_date`, observed at `as_of`.
///
/// The competition date is taken as the start of that day.
pub fn window_state(competition_date: NaiveDate, as_of: NaiveDateTime) -> RegistrationWindow {
    let starts_at = competition_date.and_time(NaiveTime::MIN);
    let cutoff = starts_at
        .checked_sub_days(Days::new(BLACKOUT_DAYS))
        .unwrap_or(NaiveDateTime::MIN);

    RegistrationWindow {
        is_past_event: as_of > starts_at,
        can_modify: as_of <= cutoff,
    }
}
