use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Logs to stderr as `[HH:MM:SS] LEVEL: message`, elapsed since start-up.
///
/// Info by default, Warn when `quiet`. `RUST_LOG` still applies on top.
pub fn init_logger(quiet: bool) {
	let start = *START_TIME.get_or_init(Instant::now);

	let level = if quiet {
		log::LevelFilter::Warn
	} else {
		log::LevelFilter::Info
	};

	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.format(move |buf, record| {
			let elapsed = start.elapsed().as_secs();
			writeln!(
				buf,
				"[{:02}:{:02}:{:02}] {}: {}",
				elapsed / 3600,
				(elapsed % 3600) / 60,
				elapsed % 60,
				record.level(),
				record.args()
			)
		})
		.target(env_logger::Target::Stderr)
		.init();
}
