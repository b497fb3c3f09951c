use clap::{CommandFactory, Parser};
use follow_tracker::config::FollowTrackerConfig;
use follow_tracker::logging;
use follow_tracker::models::EventKind;
use follow_tracker_cli::handlers::*;
use follow_tracker_cli::{
    Cli, Commands, FollowTrackerCliContext, apply_log_flags, load_config, output_error_json,
    print_json,
};
use is_terminal::IsTerminal;
use serde_json::json;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli_args = Cli::parse();

    // Determine output format - priority: machine flag > env var > cli arg > default
    let output_format = if cli_args.machine {
        "json".to_string()
    } else if let Ok(env_output) = std::env::var("FOLLOW_TRACKER_OUTPUT") {
        env_output
    } else {
        cli_args.output.clone()
    };

    // Override quiet flag with environment variable if set
    let is_quiet = cli_args.quiet
        || std::env::var("FOLLOW_TRACKER_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // Plain text when piped or when JSON is requested
    if output_format == "json" || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli_args, &output_format, is_quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error_json(&e, &output_format);
            ExitCode::FAILURE
        }
    }
}

fn run(cli_args: Cli, output_format: &str, is_quiet: bool) -> follow_tracker::Result<()> {
    match cli_args.command {
        Commands::Version => {
            if output_format == "json" {
                print_json(&json!({ "version": follow_tracker::VERSION }));
            } else {
                println!("FollowTracker CLI v{}", follow_tracker::VERSION);
            }
            Ok(())
        }

        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut cmd,
                "follow-tracker",
                &mut std::io::stdout(),
            );
            Ok(())
        }

        command => {
            let config = load_config(cli_args.config.as_deref(), cli_args.data_dir.as_deref())?;

            // Machine mode implies quiet so stdout stays clean JSON
            let config = apply_log_flags(
                config,
                cli_args.verbose,
                is_quiet || cli_args.machine,
                cli_args.log_file.as_deref(),
            )?;
            let _guard = logging::init(&config.logging)?;

            dispatch(command, config, output_format)
        }
    }
}

fn dispatch(
    command: Commands,
    config: FollowTrackerConfig,
    output_format: &str,
) -> follow_tracker::Result<()> {
    let open = FollowTrackerCliContext::new;

    match command {
        Commands::Diagnose => handle_diagnose(config, output_format),
        Commands::Show(args) => handle_show(args, &open(config)?, output_format),
        Commands::Follow(args) => {
            handle_record_event(EventKind::Followed, args, &mut open(config)?, output_format)
        }
        Commands::FollowBack(args) => handle_record_event(
            EventKind::FollowedBack,
            args,
            &mut open(config)?,
            output_format,
        ),
        Commands::Unfollow(args) => {
            handle_record_event(EventKind::Unfollowed, args, &mut open(config)?, output_format)
        }
        Commands::History(args) => handle_history(args, &open(config)?, output_format),
        Commands::List(args) => handle_list(args, &open(config)?, output_format),
        Commands::Stats => handle_stats(&open(config)?, output_format),
        Commands::Open(args) => handle_open(args, &open(config)?, output_format),
        Commands::Export(args) => handle_export(args, &open(config)?, output_format),
        Commands::Import(args) => handle_import(args, &mut open(config)?, output_format),
        Commands::Backup(args) => handle_backup(args, &open(config)?, output_format),
        Commands::Restore(args) => handle_restore(args, &mut open(config)?, output_format),
        // Answered in `run` without loading configuration
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}
