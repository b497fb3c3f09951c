//! Diagnostic checks

use crate::context::FollowTrackerCliContext;
use crate::output::*;
use follow_tracker::config::FollowTrackerConfig;
use serde_json::json;
use tracing::info;

/// Report where data lives and whether the document can be read.
///
/// Runs before the store is opened, so a broken document is reported here
/// instead of aborting the command.
pub fn handle_diagnose(config: FollowTrackerConfig, output_format: &str) -> follow_tracker::Result<()> {
    info!("Running diagnostic checks...");

    let data_path = config.storage.data_path();
    let backup_path = config.storage.backup_path();
    let document_exists = data_path.exists();
    let backup_exists = backup_path.exists();
    let url_template = config.profile.url_template.clone();

    let opened = FollowTrackerCliContext::new(config);

    if output_format == "json" {
        let (readable, accounts, error) = match &opened {
            Ok(ctx) => (true, Some(ctx.store.accounts().len()), None),
            Err(e) => (false, None, Some(e.to_string())),
        };
        print_json(&json!({
            "version": follow_tracker::VERSION,
            "data_path": data_path,
            "document_exists": document_exists,
            "document_readable": readable,
            "accounts": accounts,
            "error": error,
            "backup_path": backup_path,
            "backup_exists": backup_exists,
            "profile_url_template": url_template,
        }));
        return Ok(());
    }

    println!("{}", format_info(&format!("Document: {}", data_path.display())));
    match &opened {
        Ok(ctx) if document_exists => println!(
            "{}",
            format_success(&format!(
                "Storage: readable, {} accounts",
                ctx.store.accounts().len()
            ))
        ),
        Ok(_) => println!(
            "{}",
            format_info("Storage: no document yet, it is created on the first change")
        ),
        Err(e) => println!("{}", format_error(&format!("Storage: {}", e))),
    }

    if backup_exists {
        println!("{}", format_success(&format!("Backup: {}", backup_path.display())));
    } else {
        println!(
            "{}",
            format_warning(&format!("Backup: none at {}", backup_path.display()))
        );
    }
    println!("{}", format_info(&format!("Profile links: {}", url_template)));
    Ok(())
}
