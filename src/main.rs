use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fix_rpath::config::{
	CONFIG_FILE_NAME, Overrides, Settings, discover_configs, load_merged_config, merge_configs,
	user_config_path,
};
use fix_rpath::exec::{SystemRunner, resolve_command};
use fix_rpath::logging::init_logging;
use fix_rpath::sweep::{Sweeper, list_entries};

#[derive(Parser)]
#[command(name = "fix-rpath")]
#[command(
	author,
	version,
	about = "CLI tool for rewriting dynamic-library load paths across a directory of binaries"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Directory whose entries are rewritten [default: bin]
	#[arg(long, value_name = "DIR")]
	bin_dir: Option<PathBuf>,

	/// Load-path reference to replace [default: @rpath/libfftw3.3.dylib]
	#[arg(long, value_name = "REFERENCE")]
	old_reference: Option<String>,

	/// Absolute path of the replacement library (required)
	#[arg(long, value_name = "PATH", env = "FIX_RPATH_NEW_PATH")]
	new_path: Option<String>,

	/// Library-path editing tool [default: install_name_tool]
	#[arg(long, value_name = "PROGRAM")]
	edit_tool: Option<String>,

	/// Link-dependency inspection tool [default: otool]
	#[arg(long, value_name = "PROGRAM")]
	inspect_tool: Option<String>,

	/// Only process entries whose file name matches this regex
	#[arg(long, value_name = "REGEX")]
	include: Option<String>,

	/// Exit non-zero unless every entry ends up linked to the new path
	#[arg(long)]
	strict: bool,

	/// Print the commands without running them
	#[arg(long)]
	dry_run: bool,

	/// Create a template .fix-rpath.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .fix-rpath.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Increase log verbosity (-v info, -vv debug)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display every discovered config file in cascade order
	Show,
	/// Check config files and resolved settings without touching any binary
	Validate,
}

impl Cli {
	fn overrides(&self) -> Overrides {
		Overrides {
			bin_dir: self.bin_dir.clone(),
			old_reference: self.old_reference.clone(),
			new_path: self.new_path.clone(),
			edit_tool: self.edit_tool.clone(),
			inspect_tool: self.inspect_tool.clone(),
			include_pattern: self.include.clone(),
			strict: self.strict,
		}
	}
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(ref command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(&cli.overrides()),
			},
		};
	}

	handle_sweep(&cli.overrides(), cli.dry_run)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn init_template() -> String {
	format!(
		r#"# fix-rpath configuration.
# Files are looked up from the working directory upwards; the nearest
# value for each key wins. `root = true` stops the lookup here.
root = true

# Directory whose entries are rewritten.
bin-dir = "bin"

# Reference recorded in the binaries that should be replaced.
old-reference = "{old}"

# Absolute path of the library to link against instead. Required.
# new-path = "/path/to/libfftw3.3.dylib"

# edit-tool = "{edit}"
# inspect-tool = "{inspect}"
# include-pattern = "^geoac"
# strict = false
"#,
		old = fix_rpath::config::types::DEFAULT_OLD_REFERENCE,
		edit = fix_rpath::config::types::DEFAULT_EDIT_TOOL,
		inspect = fix_rpath::config::types::DEFAULT_INSPECT_TOOL,
	)
}

fn handle_sweep(overrides: &Overrides, dry_run: bool) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let merged = load_merged_config(&cwd).context("Failed to load configuration")?;
	let settings = Settings::resolve(overrides, &merged)?;

	let entries = list_entries(&settings.bin_dir, settings.include.as_ref())
		.context("Failed to list binaries")?;
	tracing::info!(
		count = entries.len(),
		dir = %settings.bin_dir.display(),
		"found entries"
	);

	let report = {
		let mut out = std::io::stdout().lock();
		let mut err = std::io::stderr().lock();
		Sweeper::new(&settings, &SystemRunner)
			.dry_run(dry_run)
			.run(&entries, &mut out, &mut err)?
	};

	eprintln!("{}", report.summary());

	if settings.strict && !dry_run && !report.all_linked() {
		return Ok(ExitCode::FAILURE);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");
	}

	for loaded in &configs {
		let config = &loaded.config;
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", config.root);
		if let Some(ref dir) = config.bin_dir {
			println!("  bin-dir: {}", dir.display());
		}
		if let Some(ref reference) = config.old_reference {
			println!("  old-reference: {}", reference);
		}
		if let Some(ref path) = config.new_path {
			println!("  new-path: {}", path);
		}
		if let Some(ref tool) = config.edit_tool {
			println!("  edit-tool: {}", tool);
		}
		if let Some(ref tool) = config.inspect_tool {
			println!("  inspect-tool: {}", tool);
		}
		if let Some(ref pattern) = config.include_pattern {
			println!("  include-pattern: {}", pattern);
		}
		if config.strict {
			println!("  strict: true");
		}
		println!();
	}

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(overrides: &Overrides) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let configs = match discover_configs(&cwd) {
		Ok(configs) => configs,
		Err(e) => {
			eprintln!("Configuration error: {e:?}");
			return Ok(ExitCode::FAILURE);
		}
	};

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("All configuration files are valid:");
		for loaded in &configs {
			println!("  {}", loaded.path.display());
		}
	}

	let settings = match Settings::resolve(overrides, &merge_configs(&configs)) {
		Ok(settings) => settings,
		Err(e) => {
			eprintln!("Configuration error: {e}");
			return Ok(ExitCode::FAILURE);
		}
	};

	println!("Effective settings:");
	println!("  bin-dir: {}", settings.bin_dir.display());
	println!("  old-reference: {}", settings.old_reference);
	println!("  new-path: {}", settings.new_path);
	if let Some(ref include) = settings.include {
		println!("  include-pattern: {}", include.as_str());
	}
	println!("  strict: {}", settings.strict);

	let mut ok = true;
	for (key, tool) in [
		("edit-tool", &settings.edit_tool),
		("inspect-tool", &settings.inspect_tool),
	] {
		match resolve_command(tool) {
			Some(path) => println!("  {key}: {tool} ({})", path.display()),
			None => {
				eprintln!("Tool not found: {tool} ({key})");
				ok = false;
			}
		}
	}

	if !Path::new(&settings.new_path).exists() {
		println!("  note: {} does not exist on this machine", settings.new_path);
	}

	Ok(if ok {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}
