use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{Account, RelationshipState};

/// Counts of accounts per relationship state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FollowStatistics {
    pub total: usize,
    pub followed: usize,
    pub follows_you: usize,
    pub mutual: usize,
    pub previously_followed: usize,
    pub not_followed: usize,
}

impl FollowStatistics {
    pub fn from_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let mut stats = Self::default();
        for account in accounts {
            stats.total += 1;
            match account.current_state {
                RelationshipState::Followed => stats.followed += 1,
                RelationshipState::FollowsYou => stats.follows_you += 1,
                RelationshipState::Mutual => stats.mutual += 1,
                RelationshipState::PreviouslyFollowed => stats.previously_followed += 1,
                RelationshipState::NotFollowed => stats.not_followed += 1,
            }
        }
        stats
    }

    /// Number of accounts in `state`
    pub fn count(&self, state: RelationshipState) -> usize {
        match state {
            RelationshipState::Followed => self.followed,
            RelationshipState::FollowsYou => self.follows_you,
            RelationshipState::Mutual => self.mutual,
            RelationshipState::PreviouslyFollowed => self.previously_followed,
            RelationshipState::NotFollowed => self.not_followed,
        }
    }

    /// Share of actively followed accounts that follow back, as a fraction.
    ///
    /// `None` when nobody is followed.
    pub fn follow_back_ratio(&self) -> Option<f64> {
        let followed = self.followed + self.mutual;
        if followed == 0 {
            None
        } else {
            Some(self.mutual as f64 / followed as f64)
        }
    }

    /// Follow-back rate formatted as a percentage: `"40.0%"`, or `"0%"` when
    /// nobody is followed.
    pub fn follow_back_rate(&self) -> String {
        match self.follow_back_ratio() {
            Some(ratio) => format!("{:.1}%", ratio * 100.0),
            None => "0%".to_string(),
        }
    }
}

/// Keys the account list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortCriteria {
    Username,
    LastInteraction,
    State,
}

impl SortCriteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriteria::Username => "username",
            SortCriteria::LastInteraction => "last-interaction",
            SortCriteria::State => "state",
        }
    }

    /// Compare two accounts by this key in ascending order.
    ///
    /// Accounts without a last interaction date sort first; states compare by
    /// their persisted name.
    pub fn compare(&self, a: &Account, b: &Account) -> Ordering {
        match self {
            SortCriteria::Username => a.username.cmp(&b.username),
            SortCriteria::LastInteraction => a.last_interaction_date.cmp(&b.last_interaction_date),
            SortCriteria::State => a.current_state.as_str().cmp(b.current_state.as_str()),
        }
    }
}

impl fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriteria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "username" | "name" => Ok(SortCriteria::Username),
            "last_interaction" | "fecha_ultima_interaccion" | "date" => {
                Ok(SortCriteria::LastInteraction)
            }
            "state" | "estado_actual" | "estado" => Ok(SortCriteria::State),
            _ => Err(format!("Unknown sort criteria: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_state(name: &str, state: RelationshipState) -> Account {
        let mut account = Account::new(name);
        account.current_state = state;
        account
    }

    #[test]
    fn test_follow_back_rate_three_followed_two_mutual() {
        let mut accounts = Vec::new();
        for i in 0..3 {
            accounts.push(with_state(&format!("@f{i}"), RelationshipState::Followed));
        }
        for i in 0..2 {
            accounts.push(with_state(&format!("@m{i}"), RelationshipState::Mutual));
        }
        accounts.push(with_state("@fan", RelationshipState::FollowsYou));

        let stats = FollowStatistics::from_accounts(&accounts);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.count(RelationshipState::Followed), 3);
        assert_eq!(stats.count(RelationshipState::Mutual), 2);
        assert_eq!(stats.follow_back_rate(), "40.0%");
    }

    #[test]
    fn test_follow_back_rate_without_followed_accounts() {
        let accounts = vec![with_state("@fan", RelationshipState::FollowsYou)];
        let stats = FollowStatistics::from_accounts(&accounts);
        assert_eq!(stats.follow_back_ratio(), None);
        assert_eq!(stats.follow_back_rate(), "0%");
        assert_eq!(FollowStatistics::default().follow_back_rate(), "0%");
    }

    #[test]
    fn test_parse_sort_criteria() {
        assert_eq!("username".parse(), Ok(SortCriteria::Username));
        assert_eq!(
            "fecha_ultima_interaccion".parse(),
            Ok(SortCriteria::LastInteraction)
        );
        assert_eq!("Last-Interaction".parse(), Ok(SortCriteria::LastInteraction));
        assert_eq!("estado_actual".parse(), Ok(SortCriteria::State));
        assert!("popularity".parse::<SortCriteria>().is_err());
    }
}
