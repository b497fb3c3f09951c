//! Account model representing one tracked profile and its follow history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used in the persisted document and CSV interchange
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used when rendering dates for people
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Render a date the way it is shown to the user (`dd/mm/yyyy`)
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date
pub fn parse_storage_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), STORAGE_DATE_FORMAT).ok()
}

/// Kinds of events that change a relationship
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// You started following the account
    #[serde(rename = "seguido")]
    Followed,

    /// The account followed you back
    #[serde(rename = "follow_back")]
    FollowedBack,

    /// You stopped following the account
    #[serde(rename = "dejado_de_seguir")]
    Unfollowed,
}

impl EventKind {
    /// Every event kind, in the order actions are offered
    pub const ALL: [EventKind; 3] = [
        EventKind::Followed,
        EventKind::FollowedBack,
        EventKind::Unfollowed,
    ];

    /// Name used in the persisted document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followed => "seguido",
            Self::FollowedBack => "follow_back",
            Self::Unfollowed => "dejado_de_seguir",
        }
    }

    /// Short label for the action that records this event
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Followed => "follow",
            Self::FollowedBack => "follow-back",
            Self::Unfollowed => "unfollow",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "seguido" | "followed" | "follow" => Ok(Self::Followed),
            "follow_back" | "followed_back" => Ok(Self::FollowedBack),
            "dejado_de_seguir" | "unfollowed" | "unfollow" => Ok(Self::Unfollowed),
            _ => Err(format!("Invalid event kind: {}", s)),
        }
    }
}

/// Relationship state derived from an account's event history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RelationshipState {
    /// You follow them but they do not follow you
    #[serde(rename = "seguido")]
    Followed,

    /// You follow each other
    #[serde(rename = "mutuo")]
    Mutual,

    /// You do not follow them
    #[default]
    #[serde(rename = "no_seguido")]
    NotFollowed,

    /// They follow you but you do not follow them
    #[serde(rename = "te_sigue")]
    FollowsYou,

    /// You followed them in the past but no longer do
    #[serde(rename = "seguido_previamente")]
    PreviouslyFollowed,
}

impl RelationshipState {
    /// Every state, in the order filters are offered
    pub const ALL: [RelationshipState; 5] = [
        RelationshipState::Followed,
        RelationshipState::Mutual,
        RelationshipState::NotFollowed,
        RelationshipState::FollowsYou,
        RelationshipState::PreviouslyFollowed,
    ];

    /// Name used in the persisted document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followed => "seguido",
            Self::Mutual => "mutuo",
            Self::NotFollowed => "no_seguido",
            Self::FollowsYou => "te_sigue",
            Self::PreviouslyFollowed => "seguido_previamente",
        }
    }

    /// Human readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            Self::Followed => "You follow them but they do not follow you",
            Self::Mutual => "You follow each other",
            Self::NotFollowed => "You do not follow them",
            Self::FollowsYou => "They follow you but you do not follow them",
            Self::PreviouslyFollowed => "You followed them in the past but no longer do",
        }
    }

    /// Whether recording `kind` makes sense from this state.
    ///
    /// Following is offered unless you already follow the account, a
    /// follow-back unless one is already in effect, and unfollowing whenever
    /// some follow relationship exists.
    pub fn allows(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Followed => !matches!(self, Self::Followed | Self::Mutual),
            EventKind::FollowedBack => !matches!(self, Self::Mutual | Self::FollowsYou),
            EventKind::Unfollowed => {
                matches!(self, Self::Followed | Self::Mutual | Self::FollowsYou)
            }
        }
    }

    /// Event kinds that may be recorded from this state
    pub fn available_actions(&self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| self.allows(*kind))
            .collect()
    }
}

impl fmt::Display for RelationshipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RelationshipState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "seguido" | "followed" => Ok(Self::Followed),
            "mutuo" | "mutual" => Ok(Self::Mutual),
            "no_seguido" | "not_followed" => Ok(Self::NotFollowed),
            "te_sigue" | "follows_you" => Ok(Self::FollowsYou),
            "seguido_previamente" | "previously_followed" => Ok(Self::PreviouslyFollowed),
            _ => Err(format!("Invalid relationship state: {}", s)),
        }
    }
}

/// A single dated event in an account's history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// What happened
    #[serde(rename = "tipo")]
    pub kind: EventKind,

    /// When it happened
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

impl Event {
    pub fn new(kind: EventKind, date: NaiveDate) -> Self {
        Self { kind, date }
    }
}

/// Derive the relationship state from an ordered event history.
///
/// When the latest event is a follow, only a follow-back at or after the
/// *last* follow makes the relationship mutual; follow-backs recorded before
/// it do not count.
pub fn derive_state(events: &[Event]) -> RelationshipState {
    let Some(latest) = events.last() else {
        return RelationshipState::NotFollowed;
    };

    match latest.kind {
        EventKind::Followed => {
            let last_follow = events
                .iter()
                .rposition(|event| event.kind == EventKind::Followed);

            let followed_back = last_follow.is_some_and(|index| {
                events[index..]
                    .iter()
                    .any(|event| event.kind == EventKind::FollowedBack)
            });

            if followed_back {
                RelationshipState::Mutual
            } else {
                RelationshipState::Followed
            }
        }
        EventKind::FollowedBack => RelationshipState::FollowsYou,
        EventKind::Unfollowed => RelationshipState::PreviouslyFollowed,
    }
}

/// A tracked account and its follow history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Normalized username (lower-cased, `@`-prefixed)
    pub username: String,

    /// Cached state, recomputed after every change to `events`
    #[serde(
        rename = "estado_actual",
        default,
        deserialize_with = "lenient::deserialize_state"
    )]
    pub current_state: RelationshipState,

    /// Date of the first follow; set once
    #[serde(
        rename = "fecha_primer_seguimiento",
        default,
        deserialize_with = "lenient::deserialize_date"
    )]
    pub first_followed_date: Option<NaiveDate>,

    /// Date of the most recent event
    #[serde(
        rename = "fecha_ultima_interaccion",
        default,
        deserialize_with = "lenient::deserialize_date"
    )]
    pub last_interaction_date: Option<NaiveDate>,

    /// Append-only history in chronological order
    #[serde(rename = "eventos", default)]
    pub events: Vec<Event>,
}

impl Account {
    /// Create an account with no history
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            current_state: RelationshipState::NotFollowed,
            first_followed_date: None,
            last_interaction_date: None,
            events: Vec::new(),
        }
    }

    /// Create an account whose history starts with `event`
    pub fn from_event(username: impl Into<String>, event: Event) -> Self {
        let mut account = Self::new(username);
        account.apply(event);
        account
    }

    /// Append an event and update the dates and derived state
    pub fn apply(&mut self, event: Event) {
        if event.kind == EventKind::Followed && self.first_followed_date.is_none() {
            self.first_followed_date = Some(event.date);
        }
        self.last_interaction_date = Some(event.date);
        self.events.push(event);
        self.recompute_state();
    }

    /// Recompute `current_state` from the event history
    pub fn recompute_state(&mut self) {
        self.current_state = derive_state(&self.events);
    }

    /// The most recently recorded event, if any
    pub fn last_event(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Username without the leading `@`
    pub fn handle(&self) -> &str {
        self.username.strip_prefix('@').unwrap_or(&self.username)
    }

    pub fn total_events(&self) -> usize {
        self.events.len()
    }

    /// Whether recording `kind` is offered for this account's current state
    pub fn allows(&self, kind: EventKind) -> bool {
        self.current_state.allows(kind)
    }

    /// One-line summary of the history, e.g. `05/01/2024: seguido | 07/01/2024: follow_back`
    pub fn events_summary(&self) -> String {
        if self.events.is_empty() {
            return "No events recorded".to_string();
        }

        self.events
            .iter()
            .map(|event| format!("{}: {}", display_date(event.date), event.kind))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Tolerant deserializers for hand-edited or older documents
mod lenient {
    use super::{NaiveDate, RelationshipState, STORAGE_DATE_FORMAT};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, STORAGE_DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    // Unknown names fall back to the default; the state is recomputed on load anyway.
    pub fn deserialize_state<'de, D>(deserializer: D) -> Result<RelationshipState, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }
}
