use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};
use tracing_subscriber::EnvFilter;

/// `<crate version>-<git sha>-<target triple>`, stamped at build time.
pub const VERSION: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	"-",
	env!("VERGEN_GIT_SHA"),
	"-",
	env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

/// Fallback directive when the configured level does not parse.
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn styles() -> Styles {
	let emphasis = AnsiColor::Green.on_default() | Effects::BOLD;

	Styles::styled()
		.header(emphasis)
		.usage(emphasis)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Yellow.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Builds the log filter from a configured directive such as `"cardrank_service=debug,info"`.
pub fn log_filter(level: &str) -> EnvFilter {
	let level = level.trim();

	if level.is_empty() {
		return EnvFilter::new(DEFAULT_LOG_LEVEL);
	}

	EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

pub fn init_tracing(level: &str) {
	tracing_subscriber::fmt().with_env_filter(log_filter(level)).init();
}
