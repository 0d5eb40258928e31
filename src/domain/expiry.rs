use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const DEFAULT_EXPIRE_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryAssessment {
    pub expire_days: u32,
    pub expired_at: DateTime<Utc>,
    #[serde(skip)]
    pub remaining: Option<Duration>,
    pub is_expired: bool,
}

impl ExpiryAssessment {
    pub fn evaluate(not_after: Option<DateTime<Utc>>, expire_days: u32, now: DateTime<Utc>) -> Self {
        let expired_at = now
            .checked_add_signed(Duration::days(i64::from(expire_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let remaining = not_after.map(|na| na.signed_duration_since(expired_at));
        let is_expired = not_after.map(|na| na < expired_at).unwrap_or(false);
        Self { expire_days, expired_at, remaining, is_expired }
    }

    pub fn remaining_display(&self) -> String {
        self.remaining.map(format_remaining).unwrap_or_else(|| "-".to_string())
    }
}

pub fn format_remaining(d: Duration) -> String {
    if d < Duration::zero() {
        return format!("-{}", format_remaining(-d));
    }
    let ms = d.num_milliseconds();
    let minutes = ms / 60_000 + i64::from(ms % 60_000 >= 30_000);
    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, mins)
    } else {
        format!("{}h {}m", hours, mins)
    }
}
