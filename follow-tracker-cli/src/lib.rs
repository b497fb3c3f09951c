pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use args::Cli;
pub use commands::Commands;
pub use context::{FollowTrackerCliContext, apply_log_flags, load_config};
pub use output::{
    CliColors, error_code, format_error, format_info, format_state, format_success,
    format_warning, output_error_json, print_account, print_account_list, print_history,
    print_import_summary, print_json, print_statistics,
};
pub use utils::{available_actions, parse_date, parse_state, today};
