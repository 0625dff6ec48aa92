use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Analyses per calendar month on the free tier.
pub const FREE_MONTHLY_CREDITS: i32 = 5;
/// Analyses per calendar month on the Pro tier.
pub const PRO_MONTHLY_CREDITS: i32 = 200;
/// Pro price in kobo (NGN subunits).
pub const PRO_PRICE_KOBO: i64 = 2_500_000;
/// Days of Pro access granted per successful payment.
pub const PRO_PERIOD_DAYS: i64 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    /// Parses a stored plan string. Unknown values fall back to `Free`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pro" => Plan::Pro,
            _ => Plan::Free,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
        }
    }

    pub fn monthly_credits(&self) -> i32 {
        match self {
            Plan::Free => FREE_MONTHLY_CREDITS,
            Plan::Pro => PRO_MONTHLY_CREDITS,
        }
    }

    /// Per-user request rate used by the keyed limiter, not the credit ceiling.
    pub fn requests_per_minute(&self) -> u32 {
        match self {
            Plan::Free => 10,
            Plan::Pro => 60,
        }
    }
}

/// Resolves the plan a user should be billed and limited as right now.
/// A Pro plan whose expiry has passed behaves as Free everywhere.
pub fn effective_plan(raw: &str, plan_expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Plan {
    match Plan::parse(raw) {
        Plan::Free => Plan::Free,
        Plan::Pro => match plan_expires_at {
            Some(expiry) if expiry > now => Plan::Pro,
            _ => Plan::Free,
        },
    }
}

/// Key for the monthly credit counter. Credits reset when this rolls over.
pub fn month_key(now: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", now.year(), now.month())
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanInfo {
    pub id: String,
    pub name: String,
    pub monthly_credits: i32,
    pub price_kobo: i64,
    pub currency: String,
    pub interval: String,
}

/// The fixed two-tier catalog exposed by the billing endpoints.
pub fn catalog() -> Vec<PlanInfo> {
    vec![
        PlanInfo {
            id: Plan::Free.as_str().to_string(),
            name: "Free".to_string(),
            monthly_credits: FREE_MONTHLY_CREDITS,
            price_kobo: 0,
            currency: "NGN".to_string(),
            interval: "month".to_string(),
        },
        PlanInfo {
            id: Plan::Pro.as_str().to_string(),
            name: "Pro".to_string(),
            monthly_credits: PRO_MONTHLY_CREDITS,
            price_kobo: PRO_PRICE_KOBO,
            currency: "NGN".to_string(),
            interval: "month".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn parses_plan_strings_case_insensitively() {
        assert_eq!(Plan::parse("pro"), Plan::Pro);
        assert_eq!(Plan::parse("PRO"), Plan::Pro);
        assert_eq!(Plan::parse(" Pro "), Plan::Pro);
        assert_eq!(Plan::parse("free"), Plan::Free);
        assert_eq!(Plan::parse("enterprise"), Plan::Free);
        assert_eq!(Plan::parse(""), Plan::Free);
    }

    #[test]
    fn expired_pro_is_treated_as_free() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        let active = effective_plan("pro", Some(now + Duration::days(10)), now);
        assert_eq!(active, Plan::Pro);

        let expired = effective_plan("pro", Some(now - Duration::hours(1)), now);
        assert_eq!(expired, Plan::Free);

        let no_expiry = effective_plan("pro", None, now);
        assert_eq!(no_expiry, Plan::Free);
    }

    #[test]
    fn month_key_rolls_over_on_calendar_boundary() {
        let january = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        let february = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(month_key(january), "2025-01");
        assert_eq!(month_key(february), "2025-02");
    }

    #[test]
    fn pro_ceiling_exceeds_free_ceiling() {
        assert!(Plan::Pro.monthly_credits() > Plan::Free.monthly_credits());
        assert_eq!(catalog().len(), 2);
    }
}
