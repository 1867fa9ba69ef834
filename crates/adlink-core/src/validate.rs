use chrono::NaiveDate;

use crate::error::{Error, Result};

/// A campaign must not end before it starts.
pub fn campaign_dates(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if end_date < start_date {
        return Err(Error::Validation(format!(
            "end date {} is before start date {}",
            end_date, start_date
        )));
    }
    Ok(())
}

/// Requirements are the one mandatory piece of ad-request text.
pub fn ad_request_terms(requirements: &str) -> Result<()> {
    if requirements.trim().is_empty() {
        return Err(Error::Validation("requirements must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_date_may_equal_start_date() {
        assert!(campaign_dates(date(2025, 8, 1), date(2025, 8, 1)).is_ok());
        assert!(campaign_dates(date(2025, 6, 1), date(2025, 8, 1)).is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(matches!(
            campaign_dates(date(2025, 8, 1), date(2025, 6, 1)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn blank_requirements_are_rejected() {
        assert!(matches!(
            ad_request_terms("   "),
            Err(Error::Validation(_))
        ));
        assert!(ad_request_terms("post 3x").is_ok());
    }
}
