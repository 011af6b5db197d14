// Colorized wrappers for logging

use fern::Dispatch;

#[inline(always)]
pub(crate) fn format_log(message: &str) -> String {
    let now = chrono::Local::now().format("%Y.%m.%d %H:%M:%S").to_string();
    format!("[{now}] {message}")
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        {
            let message = $crate::logging::format_log(&format!($($arg)*));
            ::log::error!("{}", ::colored::Colorize::bright_red(message.as_str()));
        }
    }
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        {
            let message = $crate::logging::format_log(&format!($($arg)*));
            ::log::info!("{message}");
        }
    }
}

#[macro_export]
macro_rules! print_debug {
    ($($arg:tt)*) => {
        {
            let message = $crate::logging::format_log(&format!($($arg)*));
            ::log::debug!("{}", ::colored::Colorize::dimmed(message.as_str()));
        }
    }
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        {
            let message = $crate::logging::format_log(&format!($($arg)*));
            ::log::warn!("{}", ::colored::Colorize::bright_yellow(message.as_str()));
        }
    }
}

/// Setup the logger. Library crates log through `log` without timestamps,
/// so their records are stamped here.
pub(crate) fn setup(verbose: bool, no_color: bool) -> Result<(), log::SetLoggerError> {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    Dispatch::new()
        .format(|out, message, record| {
            if record.target().starts_with("x52d") {
                out.finish(format_args!("{message}"));
            } else {
                out.finish(format_args!("{}", format_log(&message.to_string())));
            }
        })
        .level(log::LevelFilter::Error) // Hide sdl2 and other dependency logs
        .level_for("x52d", log_level)
        .level_for("x52_hotas", log_level)
        .level_for("x52_profile", log_level)
        .chain(std::io::stdout())
        .apply()?;

    if no_color {
        colored::control::set_override(false);
    }
    Ok(())
}
