//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_duplicates, format_search_json, format_search_text, format_stats_json,
    format_stats_text,
};
pub use route::{RunContext, UpdateRequest};
