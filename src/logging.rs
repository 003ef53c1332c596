use std::io::Write;

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};

pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,  // default: failures only
        1 => LevelFilter::Info,  // -v: startup banner, one line per request
        2 => LevelFilter::Debug, // -vv: conventions, token usage
        _ => LevelFilter::Trace, // -vvv: prompts
    };

    let mut builder = Builder::new();
    builder.filter_level(level);
    // Keep dependency chatter (hyper, reqwest) out unless asked for explicitly.
    builder.filter_module("hyper", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.parse_env("KOMMITER_LOG");

    builder.format(|buf, record| {
        let level = record.level();

        let level_label = match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".white().bold(),
            Level::Debug => "DEBUG".bright_black(),
            Level::Trace => "TRACE".bright_black(),
        };

        writeln!(
            buf,
            "{} {}",
            level_label,
            record.args()
        )
    });

    builder.init();
}
