#![cfg_attr(feature = "cargo-clippy", allow(print_with_newline))]

#![warn(
	missing_debug_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications,
)]

extern crate ataidle;

use ataidle::channel::{Channel, PlatformChannel};
#[cfg(target_os = "linux")]
use ataidle::channel::linux;
use ataidle::Error;

#[macro_use]
extern crate clap;
use clap::{
	App,
	AppSettings,
	Arg,
	ArgMatches,
};

#[macro_use]
extern crate serde_json;
extern crate separator;
extern crate prettytable;

extern crate log;
extern crate env_logger;
use log::LevelFilter;
use env_logger::Builder as LogBuilder;

#[macro_use]
extern crate lazy_static;
mod subcommands;
use subcommands::SUBCOMMANDS;

/// Prints the error and exits; every failure of this tool is fatal.
pub fn die(err: Error) -> ! {
	eprint!("{}\n", err);
	std::process::exit(1);
}

// Linux has no control device, so the user gets to choose where to look for drives
#[cfg(target_os = "linux")]
fn arg_prefix<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
	app.arg(Arg::with_name("prefix")
		.short("p")
		.long("prefix")
		.takes_value(true)
		.default_value(linux::DEFAULT_PREFIX)
		.help("Device file prefix: drives are reached as <prefix>a, <prefix>b, …, two per channel")
	)
}
#[cfg(not(target_os = "linux"))]
fn arg_prefix<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
	app
}

#[cfg(target_os = "linux")]
fn open_channel(args: &ArgMatches) -> PlatformChannel {
	// unwrap(): has default value
	linux::DeviceFiles::with_prefix(args.value_of("prefix").unwrap())
}
#[cfg(not(target_os = "linux"))]
fn open_channel(_: &ArgMatches) -> PlatformChannel {
	PlatformChannel::open().unwrap_or_else(|err| die(err))
}

fn main() {
	let mut log = LogBuilder::new();

	let app = App::new("ataidle")
		.about("sets idle/standby timers, APM and acoustic levels of ATA drives")
		.version(crate_version!())
		.setting(AppSettings::SubcommandRequired)
		.subcommands(SUBCOMMANDS.values().map(|&subcommand| subcommand.subcommand()))
		.arg(Arg::with_name("debug")
			.short("d")
			.long("debug")
			.multiple(true)
			.help("Verbose output: set once to log commands sent to drives, twice to also show raw data buffers\ncan also be set though env_logger's RUST_LOG env")
		);
	let args = arg_prefix(app).get_matches();

	if let Ok(var) = std::env::var("RUST_LOG") {
		log.parse_filters(&var);
	}
	// -d takes precedence over RUST_LOG which some might export globally for some reasons
	log.filter(Some("ataidle"), {
		use self::LevelFilter::*;
		match args.occurrences_of("debug") {
			0 => Warn,
			1 => Info,
			_ => Debug,
		}
	});
	log.init();

	let mut chan = open_channel(&args);

	let (subcommand, sargs) = args.subcommand();
	// unwrap() ×2: clap should not allow subcommands that do not exist
	let subcommand = SUBCOMMANDS.get(subcommand).unwrap();
	let sargs = sargs.unwrap();

	subcommand.run(&chan, sargs);

	chan.close();
}
