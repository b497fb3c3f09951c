use chrono::{Local, NaiveDate};
use follow_tracker::FollowTrackerError;
use follow_tracker::models::account::{DISPLAY_DATE_FORMAT, STORAGE_DATE_FORMAT};
use follow_tracker::models::{Account, EventKind, RelationshipState};

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date given as `YYYY-MM-DD` or `DD/MM/YYYY`
pub fn parse_date(date_str: &str) -> follow_tracker::Result<NaiveDate> {
    let trimmed = date_str.trim();
    NaiveDate::parse_from_str(trimmed, STORAGE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT))
        .map_err(|_| {
            FollowTrackerError::Other(format!(
                "Invalid date '{}': use YYYY-MM-DD or DD/MM/YYYY",
                date_str
            ))
        })
}

pub fn parse_state(state_str: &str) -> follow_tracker::Result<RelationshipState> {
    state_str.parse().map_err(|_| {
        FollowTrackerError::Other(format!(
            "Invalid state: {} (expected one of: followed, mutual, not-followed, follows-you, previously-followed)",
            state_str
        ))
    })
}

/// Actions offered for an account; an untracked account can only be followed
pub fn available_actions(account: Option<&Account>) -> Vec<EventKind> {
    match account {
        Some(account) => account.current_state.available_actions(),
        None => vec![EventKind::Followed],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use follow_tracker::models::Event;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05").unwrap(), expected);
        assert_eq!(parse_date(" 05/01/2024 ").unwrap(), expected);
        assert!(parse_date("January 5th").is_err());
    }

    #[test]
    fn test_parse_state_accepts_persisted_names() {
        assert_eq!(parse_state("te_sigue").unwrap(), RelationshipState::FollowsYou);
        assert_eq!(parse_state("mutual").unwrap(), RelationshipState::Mutual);
        assert!(parse_state("blocked").is_err());
    }

    #[test]
    fn test_untracked_accounts_can_only_be_followed() {
        assert_eq!(available_actions(None), vec![EventKind::Followed]);

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let account = Account::from_event("@bob", Event::new(EventKind::Followed, date));
        assert_eq!(
            available_actions(Some(&account)),
            vec![EventKind::FollowedBack, EventKind::Unfollowed]
        );
    }
}
