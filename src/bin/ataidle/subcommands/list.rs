use ataidle::channel::PlatformChannel;
use ataidle::misc::Misc;

use clap::{
	ArgMatches,
	App,
	SubCommand,
};

use serde_json;

use prettytable;
use prettytable::{Table, Row, Cell};

use super::{Subcommand, arg_json};
use crate::die;

pub struct List {}
impl Subcommand for List {
	fn subcommand(&self) -> App<'static, 'static> {
		SubCommand::with_name("list")
			.about("Lists drives on all channels")
			.arg(arg_json())
	}

	fn run(&self, chan: &PlatformChannel, args: &ArgMatches) {
		let devs = chan.list_devices().unwrap_or_else(|err| die(err));

		if args.is_present("json") {
			let devs: Vec<_> = devs.iter().map(|(addr, id)| json!({
				"channel": addr.channel(),
				"device": addr.device(),
				"id": id,
			})).collect();
			print!("{}\n", serde_json::to_string(&devs).unwrap());
			return;
		}

		if devs.is_empty() {
			print!("No devices found.\n");
			return;
		}

		let mut table = Table::new();
		table.set_format(*prettytable::format::consts::FORMAT_CLEAN);
		table.set_titles(Row::new(
			["Channel", "Device", "Model", "Serial", "Capacity"].iter()
				.map(|title| Cell::new(title))
				.collect()
		));

		for (addr, id) in devs {
			table.add_row(Row::new(vec![
				Cell::new(&addr.channel().to_string()).style_spec("r"),
				Cell::new(&addr.device().to_string()).style_spec("r"),
				Cell::new(&id.model),
				Cell::new(&id.serial),
				Cell::new(&id.capacity()).style_spec("r"),
			]));
		}

		table.printstd();
	}
}
