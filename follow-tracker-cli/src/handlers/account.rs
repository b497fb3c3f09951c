//! Single-account command handlers

use crate::args::{EventArgs, OpenArgs, UsernameArgs};
use crate::context::FollowTrackerCliContext;
use crate::output::*;
use crate::utils::{available_actions, parse_date, today};
use follow_tracker::FollowTrackerError;
use follow_tracker::core::profile_url;
use follow_tracker::models::EventKind;
use follow_tracker::models::account::display_date;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

pub fn handle_show(
    args: UsernameArgs,
    ctx: &FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let username = ctx.store.normalize(&args.username)?;
    let account = ctx.store.find(&username);
    let actions = available_actions(account);

    if output_format == "json" {
        let labels: Vec<_> = actions.iter().map(|kind| kind.action_label()).collect();
        print_json(&json!({
            "username": username,
            "found": account.is_some(),
            "account": account,
            "description": account.map(|a| a.current_state.description()),
            "available_actions": labels,
        }));
        return Ok(());
    }

    match account {
        Some(account) => print_account(account, &actions),
        None => {
            println!(
                "{}",
                format_info(&format!("{} is not in your follow list yet.", username))
            );
            print_actions(&actions);
        }
    }
    Ok(())
}

/// Record a follow, follow-back or unfollow.
///
/// Refuses actions the current state does not offer unless `--force` is set.
pub fn handle_record_event(
    kind: EventKind,
    args: EventArgs,
    ctx: &mut FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let date = match args.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today(),
    };
    let username = ctx.store.normalize(&args.username)?;

    let existing = ctx.store.find(&username);
    if !available_actions(existing).contains(&kind) {
        let state = existing.map(|a| a.current_state).unwrap_or_default();
        if !args.force {
            return Err(FollowTrackerError::ActionNotAllowed {
                username,
                kind,
                state,
            });
        }
        warn!(%username, kind = %kind, state = %state, "recording event not offered for state (forced)");
    }

    let account = ctx.store.record_event(&username, kind, date)?;

    if output_format == "json" {
        print_json(account);
    } else {
        println!(
            "{}",
            format_success(&format!(
                "Recorded {} for {} on {}; state is now {}",
                kind.action_label(),
                account.username,
                display_date(date),
                account.current_state
            ))
        );
    }
    Ok(())
}

pub fn handle_history(
    args: UsernameArgs,
    ctx: &FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let username = ctx.store.normalize(&args.username)?;
    let account = ctx.store.get(&username)?;

    if output_format == "json" {
        print_json(&json!({
            "username": account.username,
            "events": account.events,
            "summary": account.events_summary(),
        }));
    } else {
        print_history(account);
    }
    Ok(())
}

/// Profile page of an account, as reported by `open`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileLink {
    pub username: String,
    pub url: String,
    pub opened: bool,
}

/// Normalize the username and build its profile URL from the configured template
pub fn profile_link(args: &OpenArgs, ctx: &FollowTrackerCliContext) -> follow_tracker::Result<ProfileLink> {
    let username = ctx.store.normalize(&args.username)?;
    let url = profile_url(&username, &ctx.config.profile.url_template);
    Ok(ProfileLink {
        username,
        url,
        opened: !args.print_only,
    })
}

/// Open the profile page in the system browser. The account does not need
/// to be tracked.
pub fn handle_open(
    args: OpenArgs,
    ctx: &FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let link = profile_link(&args, ctx)?;

    if link.opened {
        debug!(url = %link.url, "opening profile");
        open::that_detached(&link.url).map_err(|e| {
            FollowTrackerError::Other(format!("Could not open browser for {}: {}", link.url, e))
        })?;
    }

    if output_format == "json" {
        print_json(&link);
    } else if link.opened {
        println!("{}", format_info(&format!("Opened {}", link.url)));
    } else {
        println!("{}", link.url);
    }
    Ok(())
}
