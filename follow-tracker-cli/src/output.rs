use colored::*;
use follow_tracker::FollowTrackerError;
use follow_tracker::core::{FollowStatistics, ImportSummary};
use follow_tracker::models::account::display_date;
use follow_tracker::models::{Account, EventKind, RelationshipState};
use serde::Serialize;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn mutual() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Machine-readable code for an error
pub fn error_code(error: &FollowTrackerError) -> &'static str {
    match error {
        FollowTrackerError::Storage(_) => "STORAGE_ERROR",
        FollowTrackerError::InvalidUsername { .. } => "INVALID_USERNAME",
        FollowTrackerError::Configuration(_) => "CONFIGURATION_ERROR",
        FollowTrackerError::Logging(_) => "LOGGING_ERROR",
        FollowTrackerError::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
        FollowTrackerError::ActionNotAllowed { .. } => "ACTION_NOT_ALLOWED",
        FollowTrackerError::Interchange(_) => "INTERCHANGE_ERROR",
        FollowTrackerError::Other(_) => "OTHER_ERROR",
    }
}

/// Output a FollowTrackerError in structured JSON format, or as a red line
pub fn output_error_json(error: &FollowTrackerError, output_format: &str) {
    if output_format == "json" {
        let details = match error {
            FollowTrackerError::InvalidUsername { input, reason } => Some(json!({
                "input": input,
                "reason": reason.to_string(),
            })),
            FollowTrackerError::AccountNotFound { username } => Some(json!({
                "username": username,
            })),
            FollowTrackerError::ActionNotAllowed {
                username,
                kind,
                state,
            } => Some(json!({
                "username": username,
                "kind": kind,
                "state": state,
                "hint": "Use --force to record it anyway",
            })),
            _ => None,
        };

        let mut error_response = json!({
            "error": true,
            "code": error_code(error),
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if let Some(details) = details {
            error_response["details"] = details;
        }

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_state(state: &RelationshipState) -> ColoredString {
    match state {
        RelationshipState::Mutual => state.as_str().color(CliColors::mutual()).bold(),
        RelationshipState::Followed => state.as_str().color(CliColors::info()),
        RelationshipState::FollowsYou => state.as_str().color(CliColors::success()),
        RelationshipState::PreviouslyFollowed => state.as_str().color(CliColors::warning()),
        RelationshipState::NotFollowed => state.as_str().color(CliColors::muted()),
    }
}

fn format_optional_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(display_date).unwrap_or_else(|| "N/A".to_string())
}

pub fn print_account(account: &Account, actions: &[EventKind]) {
    println!(
        "{}",
        "━━━ Account Details ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Username".color(CliColors::muted()),
        account.username.color(CliColors::accent()).bold()
    );
    println!(
        "{}: {} ({})",
        "State".color(CliColors::muted()),
        format_state(&account.current_state),
        account.current_state.description()
    );
    println!(
        "{}: {}",
        "First followed".color(CliColors::muted()),
        format_optional_date(account.first_followed_date).color(CliColors::primary())
    );
    println!(
        "{}: {}",
        "Last interaction".color(CliColors::muted()),
        format_optional_date(account.last_interaction_date).color(CliColors::primary())
    );
    println!(
        "{}: {}",
        "Events".color(CliColors::muted()),
        account.events_summary()
    );
    print_actions(actions);
}

pub fn print_actions(actions: &[EventKind]) {
    let labels = if actions.is_empty() {
        "none".to_string()
    } else {
        actions
            .iter()
            .map(|kind| kind.action_label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!(
        "{}: {}",
        "Available actions".color(CliColors::muted()),
        labels.color(CliColors::info())
    );
}

pub fn print_account_list(accounts: &[&Account]) {
    if accounts.is_empty() {
        println!("{}", format_info("No accounts found."));
        return;
    }

    println!(
        "{}",
        format_info(&format!("Found {} accounts:", accounts.len()))
    );
    println!();

    println!(
        "{:<32} {:<20} {:<16} {}",
        "Username".color(CliColors::muted()).bold(),
        "State".color(CliColors::muted()).bold(),
        "First followed".color(CliColors::muted()).bold(),
        "Last interaction".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(84).color(CliColors::muted()));

    for account in accounts {
        println!(
            "{:<32} {:<20} {:<16} {}",
            account.username.color(CliColors::accent()),
            format_state(&account.current_state),
            format_optional_date(account.first_followed_date),
            format_optional_date(account.last_interaction_date)
        );
    }
}

pub fn print_history(account: &Account) {
    println!(
        "{}",
        format!("━━━ History of {} ━━━", account.username)
            .color(CliColors::accent())
            .bold()
    );

    if account.events.is_empty() {
        println!("{}", "No events recorded".color(CliColors::muted()));
        return;
    }

    for (index, event) in account.events.iter().enumerate() {
        println!(
            "{:>3}. {}  {}",
            index + 1,
            display_date(event.date).color(CliColors::primary()),
            event.kind.as_str().color(CliColors::info())
        );
    }
}

pub fn print_statistics(stats: &FollowStatistics) {
    println!("{}", "━━━ Statistics ━━━".color(CliColors::accent()).bold());
    println!(
        "{:<22} {}",
        "Total accounts".color(CliColors::muted()),
        stats.total.to_string().bold()
    );
    for state in RelationshipState::ALL {
        println!(
            "{:<22} {}",
            format_state(&state),
            stats.count(state)
        );
    }
    println!(
        "{:<22} {}",
        "Follow-back rate".color(CliColors::muted()),
        stats.follow_back_rate().color(CliColors::success()).bold()
    );
}

pub fn print_import_summary(summary: &ImportSummary) {
    println!(
        "{}",
        format_success(&format!("Imported {} accounts", summary.imported.len()))
    );
    if !summary.skipped_existing.is_empty() {
        println!(
            "{}",
            format_info(&format!(
                "Skipped {} already tracked: {}",
                summary.skipped_existing.len(),
                summary.skipped_existing.join(", ")
            ))
        );
    }
    if !summary.rejected.is_empty() {
        println!(
            "{}",
            format_warning(&format!(
                "Rejected {} invalid usernames: {}",
                summary.rejected.len(),
                summary.rejected.join(", ")
            ))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = FollowTrackerError::AccountNotFound {
            username: "@ghost".into(),
        };
        assert_eq!(error_code(&err), "ACCOUNT_NOT_FOUND");
        assert_eq!(
            error_code(&FollowTrackerError::Storage("disk full".into())),
            "STORAGE_ERROR"
        );
    }

    #[test]
    fn test_format_helpers_keep_message() {
        colored::control::set_override(false);
        assert_eq!(format_success("saved"), "✓ saved");
        assert_eq!(format_error("failed"), "✗ failed");
        assert_eq!(format_state(&RelationshipState::Mutual).to_string(), "mutuo");
    }
}
