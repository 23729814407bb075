pub mod info;
pub mod level;
pub mod list;
pub mod timer;

use ataidle::channel::{Channel, DeviceAddress, PlatformChannel};

use clap::{
	Arg,
	ArgMatches,
	App,
};

use std::collections::HashMap;

use crate::die;

pub trait Subcommand {
	fn subcommand(&self) -> App<'static, 'static>;
	fn run(&self, chan: &PlatformChannel, args: &ArgMatches);
}

lazy_static! {
	pub static ref SUBCOMMANDS: HashMap<&'static str, &'static (dyn Subcommand + Sync)> = {
		let mut m: HashMap<&'static str, &'static (dyn Subcommand + Sync)> = HashMap::new();
		m.insert("info", &info::Info {});
		m.insert("list", &list::List {});
		m.insert("idle", &timer::Timer::Idle);
		m.insert("standby", &timer::Timer::Standby);
		m.insert("acoustic", &level::SetLevel::Acoustic);
		m.insert("apm", &level::SetLevel::APM);
		m
	};
}

pub fn arg_json() -> Arg<'static, 'static> {
	Arg::with_name("json")
		.long("json")
		.help("Export data in JSON")
}

/// `<channel> <device>` pair; adds them to the subcommand as the first two positional arguments.
pub fn args_address(app: App<'static, 'static>) -> App<'static, 'static> {
	app
		.arg(Arg::with_name("channel")
			.help("ATA channel the drive is attached to, starting from 0")
			.required(true)
			.index(1)
		)
		.arg(Arg::with_name("device")
			.help("0 for primary (master) device on the channel, 1 for secondary (slave)")
			.required(true)
			.possible_values(&["0", "1"])
			.index(2)
		)
}

/// Reads `<channel> <device>` and makes sure such an address can exist, exiting otherwise.
pub fn address(chan: &PlatformChannel, args: &ArgMatches) -> DeviceAddress {
	let channel = value_t!(args, "channel", u32).unwrap_or_else(|_| {
		eprint!("invalid channel\n");
		::std::process::exit(1);
	});
	let device = value_t!(args, "device", u32).unwrap_or_else(|_| {
		eprint!("invalid device\n");
		::std::process::exit(1);
	});

	let max = chan.max_channel().unwrap_or_else(|err| die(err));
	if channel >= max {
		eprint!("invalid channel {}: there are only {} channel(s)\n", channel, max);
		::std::process::exit(1);
	}

	DeviceAddress::new(channel, device).unwrap_or_else(|| {
		eprint!("invalid device\n");
		::std::process::exit(1);
	})
}
