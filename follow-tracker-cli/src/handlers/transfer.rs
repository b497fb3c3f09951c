//! Export, import, backup and restore handlers

use crate::args::{BackupArgs, FileArgs};
use crate::context::FollowTrackerCliContext;
use crate::output::*;
use follow_tracker::FollowTrackerError;
use follow_tracker::interchange::{export_csv_file, import_csv_file};
use serde_json::json;
use std::path::PathBuf;

fn backup_path(args: BackupArgs, ctx: &FollowTrackerCliContext) -> PathBuf {
    args.path
        .unwrap_or_else(|| ctx.config.storage.backup_path())
}

pub fn handle_export(
    args: FileArgs,
    ctx: &FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let accounts = ctx.store.accounts();
    export_csv_file(&args.path, accounts)
        .map_err(|e| FollowTrackerError::Interchange(e.to_string()))?;

    if output_format == "json" {
        print_json(&json!({
            "path": args.path,
            "exported": accounts.len(),
        }));
    } else {
        println!(
            "{}",
            format_success(&format!(
                "Exported {} accounts to {}",
                accounts.len(),
                args.path.display()
            ))
        );
    }
    Ok(())
}

pub fn handle_import(
    args: FileArgs,
    ctx: &mut FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let incoming = import_csv_file(&args.path)
        .map_err(|e| FollowTrackerError::Interchange(e.to_string()))?;
    let summary = ctx.store.import_accounts(incoming)?;

    if output_format == "json" {
        print_json(&summary);
    } else {
        print_import_summary(&summary);
    }
    Ok(())
}

pub fn handle_backup(
    args: BackupArgs,
    ctx: &FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let path = backup_path(args, ctx);
    let count = ctx.store.backup(&path)?;

    if output_format == "json" {
        print_json(&json!({ "path": path, "accounts": count }));
    } else {
        println!(
            "{}",
            format_success(&format!("Backed up {} accounts to {}", count, path.display()))
        );
    }
    Ok(())
}

pub fn handle_restore(
    args: BackupArgs,
    ctx: &mut FollowTrackerCliContext,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let path = backup_path(args, ctx);
    let count = ctx.store.restore(&path)?;

    if output_format == "json" {
        print_json(&json!({ "path": path, "accounts": count }));
    } else {
        println!(
            "{}",
            format_success(&format!("Restored {} accounts from {}", count, path.display()))
        );
    }
    Ok(())
}
