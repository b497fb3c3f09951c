//! List and statistics handlers

use crate::args::ListArgs;
use crate::context::FollowTrackerCliContext;
use crate::output::*;
use crate::utils::parse_state;
use follow_tracker::models::Account;
use serde_json::json;

/// Accounts selected by `args`: filtered by state, then sorted.
///
/// An unknown sort key keeps the stored order.
pub fn select_accounts<'a>(
    args: &ListArgs,
    ctx: &'a FollowTrackerCliContext,
) -> follow_tracker::Result<Vec<&'a Account>> {
    let state = args.state.as_deref().map(parse_state).transpose()?;
    let filtered = ctx.store.filter(state);

    let Some(criteria) = args.sort.as_deref() else {
        return Ok(filtered);
    };

    let sorted = ctx
        .store
        .sort_by_name(criteria, args.desc)
        .into_iter()
        .filter(|account| state.is_none_or(|s| account.current_state == s))
        .collect();
    Ok(sorted)
}

pub fn handle_list(
    args: ListArgs,
    ctx: &FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let accounts = select_accounts(&args, ctx)?;

    if output_format == "json" {
        print_json(&accounts);
    } else {
        print_account_list(&accounts);
    }
    Ok(())
}

pub fn handle_stats(ctx: &FollowTrackerCliContext, output_format: &str) -> follow_tracker::Result<()> {
    let stats = ctx.store.statistics();

    if output_format == "json" {
        print_json(&json!({
            "statistics": stats,
            "follow_back_rate": stats.follow_back_rate(),
        }));
    } else {
        print_statistics(&stats);
    }
    Ok(())
}
