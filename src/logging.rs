use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` picks the level:
/// 0 = warn, 1 = info, 2+ = debug. Stdout is left to the sweep output.
pub fn init_logging(verbosity: u8) {
	let default_directive = match verbosity {
		0 => "fix_rpath=warn",
		1 => "fix_rpath=info",
		_ => "fix_rpath=debug",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	// A second init (e.g. from tests) keeps the first subscriber.
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_target(false)
				.compact(),
		)
		.try_init();
}
