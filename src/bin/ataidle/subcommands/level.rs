use ataidle::channel::PlatformChannel;
use ataidle::misc::{Misc, Level, ACOUSTIC_MAX, ACOUSTIC_OFFSET, APM_MAX};

use clap::{
	Arg,
	ArgMatches,
	App,
	SubCommand,
};

use super::{Subcommand, args_address, address};
use crate::die;

/// Both are SET FEATURES with a level in the sector count, hence the shared subcommand
#[derive(Debug)]
pub enum SetLevel {
	Acoustic,
	APM,
}

impl SetLevel {
	fn name(&self) -> &'static str {
		match *self {
			SetLevel::Acoustic => "acoustic",
			SetLevel::APM => "apm",
		}
	}
}

impl Subcommand for SetLevel {
	fn subcommand(&self) -> App<'static, 'static> {
		let (about, help) = match *self {
			SetLevel::Acoustic => (
				"Sets Automatic Acoustic Management level",
				"1 (quietest) to 127 (fastest), 0 turns AAM off",
			),
			SetLevel::APM => (
				"Sets Advanced Power Management level",
				"1 (least power consumption) to 254 (best performance), 0 turns APM off; levels up to 127 allow the drive to spin down",
			),
		};

		args_address(SubCommand::with_name(self.name()).about(about))
			.arg(Arg::with_name("value")
				.help(help)
				.required(true)
				.index(3)
			)
	}

	fn run(&self, chan: &PlatformChannel, args: &ArgMatches) {
		let addr = address(chan, args);

		let value = value_t!(args, "value", u32).unwrap_or_else(|_| {
			eprint!("invalid {} value\n", self.name());
			::std::process::exit(1);
		});

		match *self {
			SetLevel::Acoustic => {
				let level = chan.set_acoustic(addr, value).unwrap_or_else(|err| die(err));
				print!("Set AutoAcoustic value to {}\n", value);
				match level {
					Level::Disabled =>
						print!("Acoustic management disabled\n"),
					Level::Enabled(l) if l as u32 == ACOUSTIC_MAX + ACOUSTIC_OFFSET as u32 =>
						print!("Acoustic value set to maximum performance (most acoustic impact)\n"),
					Level::Enabled(l) if l == ACOUSTIC_OFFSET + 1 =>
						print!("Acoustic value set to minimum performance (least acoustic impact)\n"),
					_ => (),
				}
			},
			SetLevel::APM => {
				let level = chan.set_apm(addr, value).unwrap_or_else(|err| die(err));
				print!("Set APM value to {}\n", value);
				match level {
					Level::Disabled =>
						print!("APM disabled\n"),
					Level::Enabled(l) if l as u32 == APM_MAX =>
						print!("APM value set to maximum performance (most power consumption)\n"),
					Level::Enabled(1) =>
						print!("APM value set to minimum performance (least power consumption)\n"),
					_ => (),
				}
			},
		}
	}
}
