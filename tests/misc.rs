extern crate ataidle;

use ataidle::{Direction, Error};
use ataidle::ata::RegistersWrite;
use ataidle::ata::timer::{self, TimerEncoding};
use ataidle::channel::{Channel, DeviceAddress};
use ataidle::enumerate;
use ataidle::misc::{Misc, Level};

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

/// Pretends to be a bunch of drives, remembering every command sent to them.
struct Recorder {
	channels: Option<u32>,
	present: Vec<DeviceAddress>,
	// IDENTIFY replies; present drives without one reply with zeroes
	replies: HashMap<DeviceAddress, Vec<u8>>,
	// (address, opcode) pairs the drive aborts
	aborts: Vec<(DeviceAddress, u8)>,
	sent: RefCell<Vec<(DeviceAddress, RegistersWrite)>>,
	// number of is_present() calls
	probes: Cell<usize>,
	closed: bool,
}

impl Recorder {
	fn new(channels: u32) -> Self {
		Recorder {
			channels: Some(channels),
			present: vec![],
			replies: HashMap::new(),
			aborts: vec![],
			sent: RefCell::new(vec![]),
			probes: Cell::new(0),
			closed: false,
		}
	}

	fn with_drive(mut self, addr: DeviceAddress) -> Self {
		self.present.push(addr);
		self
	}

	fn with_reply(mut self, addr: DeviceAddress, reply: Vec<u8>) -> Self {
		self.replies.insert(addr, reply);
		self
	}

	fn aborting(mut self, addr: DeviceAddress, command: u8) -> Self {
		self.aborts.push((addr, command));
		self
	}

	/// (command, features, sector count) of everything sent so far
	fn commands(&self) -> Vec<(u8, u8, u8)> {
		self.sent.borrow().iter()
			.map(|(_, regs)| (regs.command, regs.features, regs.sector_count))
			.collect()
	}
}

impl Channel for Recorder {
	fn open() -> Result<Self, Error> {
		Ok(Recorder::new(1))
	}

	fn max_channel(&self) -> Result<u32, Error> {
		self.channels.ok_or_else(|| Error::QueryFailed(
			"maximum channel",
			io::Error::new(io::ErrorKind::PermissionDenied, "no access"),
		))
	}

	fn is_present(&self, addr: DeviceAddress) -> bool {
		self.probes.set(self.probes.get() + 1);
		self.present.contains(&addr)
	}

	fn ata_do(&self, addr: DeviceAddress, dir: Direction, regs: &RegistersWrite) -> Result<Vec<u8>, io::Error> {
		self.sent.borrow_mut().push((addr, regs.clone()));

		if self.aborts.contains(&(addr, regs.command)) {
			return Err(io::Error::new(io::ErrorKind::Other, "command aborted"));
		}

		Ok(match dir {
			Direction::From => self.replies.get(&addr).cloned().unwrap_or_else(|| vec![0; 512]),
			Direction::None => vec![],
		})
	}

	fn close(&mut self) {
		self.closed = true;
	}
}

fn addr(channel: u32, device: u32) -> DeviceAddress {
	DeviceAddress::new(channel, device).unwrap()
}

/// IDENTIFY DEVICE reply of a drive with the given model name and size
fn identify_reply(model: &str, sectors: u32) -> Vec<u8> {
	let mut data = vec![0u8; 512];

	// general configuration: fixed, non-removable, ATA
	data[0] = 0x40;

	data[120] = sectors as u8;
	data[121] = (sectors >> 8) as u8;
	data[122] = (sectors >> 16) as u8;
	data[123] = (sectors >> 24) as u8;

	// words 27-46, two characters per word, first one in the high byte, padded with spaces
	let model = format!("{:<40}", model);
	for (i, c) in model.bytes().enumerate() {
		data[54 + (i ^ 1)] = c;
	}

	data
}

#[test]
fn absent_drive_gets_no_commands() {
	let chan = Recorder::new(1).with_drive(addr(0, 0));
	let absent = addr(0, 1);

	match chan.set_idle(absent, 60) {
		Err(Error::DeviceAbsent(a)) => assert_eq!(a, absent),
		other => panic!("unexpected {:?}", other),
	}
	// presence is checked before the timeout is even looked at
	assert!(matches!(chan.set_idle(absent, 45), Err(Error::DeviceAbsent(_))));
	assert!(matches!(chan.set_standby(absent, 0), Err(Error::DeviceAbsent(_))));
	assert!(matches!(chan.set_acoustic(absent, 200), Err(Error::DeviceAbsent(_))));
	assert!(matches!(chan.set_apm(absent, 1), Err(Error::DeviceAbsent(_))));
	assert!(matches!(chan.identify(absent), Err(Error::DeviceAbsent(_))));

	assert!(chan.commands().is_empty());
}

#[test]
fn idle_timer() {
	let drive = addr(0, 1);
	let chan = Recorder::new(1).with_drive(drive);

	assert_eq!(chan.set_idle(drive, 60).unwrap(), TimerEncoding::Register(243));
	assert_eq!(chan.commands(), vec![(0xe3, 0, 243)]);
	assert_eq!(chan.sent.borrow()[0].0, drive);
	assert_eq!(chan.sent.borrow()[0].1.timeout, ataidle::ata::CMD_TIMEOUT);

	let off = chan.set_idle(drive, 0).unwrap();
	assert!(off.is_disabled());
	assert_eq!(chan.commands()[1], (0xe3, 0, 0));
}

#[test]
fn idle_immediately() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive);

	assert_eq!(chan.set_idle(drive, timer::IMMEDIATE).unwrap(), TimerEncoding::Immediate);
	assert_eq!(chan.commands(), vec![(0xe1, 0, 0)]);
}

#[test]
fn standby_timer() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive);

	assert_eq!(chan.set_standby(drive, 20).unwrap(), TimerEncoding::Register(240));
	assert_eq!(chan.set_standby(drive, 21).unwrap(), TimerEncoding::Register(252));
	assert_eq!(chan.set_standby(drive, timer::IMMEDIATE).unwrap(), TimerEncoding::Immediate);
	assert_eq!(chan.commands(), vec![(0xe2, 0, 240), (0xe2, 0, 252), (0xe0, 0, 0)]);
}

#[test]
fn unencodable_timeout_is_not_sent() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive);

	assert!(matches!(chan.set_idle(drive, 25), Err(Error::InvalidDuration(25))));
	assert!(matches!(chan.set_standby(drive, 45), Err(Error::InvalidDuration(45))));
	assert!(matches!(chan.set_standby(drive, 360), Err(Error::InvalidDuration(360))));
	assert!(chan.commands().is_empty());
}

#[test]
fn acoustic_level() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive);

	assert_eq!(chan.set_acoustic(drive, 127).unwrap(), Level::Enabled(254));
	assert_eq!(chan.set_acoustic(drive, 1).unwrap(), Level::Enabled(128));
	assert_eq!(chan.set_acoustic(drive, 0).unwrap(), Level::Disabled);
	assert_eq!(chan.commands(), vec![(0xef, 0x42, 254), (0xef, 0x42, 128), (0xef, 0xc2, 0)]);

	match chan.set_acoustic(drive, 128) {
		Err(Error::InvalidLevel(_, value, max)) => {
			assert_eq!(value, 128);
			assert_eq!(max, 127);
		},
		other => panic!("unexpected {:?}", other),
	}
	assert_eq!(chan.commands().len(), 3);
}

#[test]
fn apm_level() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive);

	assert_eq!(chan.set_apm(drive, 254).unwrap(), Level::Enabled(254));
	assert_eq!(chan.set_apm(drive, 1).unwrap(), Level::Enabled(1));
	assert_eq!(chan.set_apm(drive, 0).unwrap(), Level::Disabled);
	assert_eq!(chan.commands(), vec![(0xef, 0x05, 254), (0xef, 0x05, 1), (0xef, 0x85, 0)]);

	assert!(matches!(chan.set_apm(drive, 255), Err(Error::InvalidLevel(_, 255, 254))));
	assert_eq!(chan.commands().len(), 3);
}

#[test]
fn presence_is_checked_once_per_operation() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1)
		.with_drive(drive)
		.aborting(drive, 0xec);

	chan.set_idle(drive, 60).unwrap();
	assert_eq!(chan.probes.get(), 1);
	chan.set_standby(drive, timer::IMMEDIATE).unwrap();
	assert_eq!(chan.probes.get(), 2);
	chan.set_acoustic(drive, 64).unwrap();
	assert_eq!(chan.probes.get(), 3);
	chan.set_apm(drive, 0).unwrap();
	assert_eq!(chan.probes.get(), 4);

	// falls back to IDENTIFY PACKET DEVICE without asking again
	chan.identify(drive).unwrap();
	assert_eq!(chan.probes.get(), 5);
	assert_eq!(chan.commands().len(), 6);
}

#[test]
fn failed_command() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive).aborting(drive, 0xef);

	match chan.set_apm(drive, 128) {
		Err(Error::CommandFailed(command, _)) => assert_eq!(command, "SET FEATURES"),
		other => panic!("unexpected {:?}", other),
	}
	// no retries
	assert_eq!(chan.commands().len(), 1);
}

#[test]
fn identify() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1)
		.with_drive(drive)
		.with_reply(drive, identify_reply("WDC WD800BB-00CAA1", 156301488));

	let id = chan.identify(drive).unwrap();
	assert_eq!(id.model, "WDC WD800BB-00CAA1");
	assert_eq!(id.capacity(), "74GB");
	assert_eq!(chan.commands(), vec![(0xec, 0, 0)]);
}

#[test]
fn identify_packet_fallback() {
	let drive = addr(0, 1);
	let chan = Recorder::new(1)
		.with_drive(drive)
		.with_reply(drive, identify_reply("HL-DT-ST DVD-RAM GH22NP20", 0))
		.aborting(drive, 0xec);

	let id = chan.identify(drive).unwrap();
	assert_eq!(id.model, "HL-DT-ST DVD-RAM GH22NP20");
	assert_eq!(chan.commands(), vec![(0xec, 0, 0), (0xa1, 0, 0)]);
}

#[test]
fn identify_fails() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1)
		.with_drive(drive)
		.aborting(drive, 0xec)
		.aborting(drive, 0xa1);

	match chan.identify(drive) {
		Err(Error::QueryFailed(what, _)) => assert_eq!(what, "device identity"),
		other => panic!("unexpected {:?}", other),
	}
	// exactly one fallback attempt
	assert_eq!(chan.commands(), vec![(0xec, 0, 0), (0xa1, 0, 0)]);
}

#[test]
fn blank_identity() {
	let drive = addr(0, 0);
	let chan = Recorder::new(1).with_drive(drive);

	// plain identify is happy to return whatever the drive sent
	assert!(!chan.identify(drive).unwrap().is_present());
	assert!(matches!(chan.device_info(drive), Err(Error::DeviceAbsent(_))));
}

#[test]
fn list_devices() {
	let chan = Recorder::new(3)
		.with_drive(addr(0, 0))
		.with_reply(addr(0, 0), identify_reply("ST3200822A", 390721968))
		// replies with zeroes
		.with_drive(addr(0, 1))
		// refuses to identify itself either way
		.with_drive(addr(1, 1))
		.aborting(addr(1, 1), 0xec)
		.aborting(addr(1, 1), 0xa1)
		.with_drive(addr(2, 1))
		.with_reply(addr(2, 1), identify_reply("Maxtor 6Y080L0", 160086528));

	let devs = chan.list_devices().unwrap();
	let found: Vec<_> = devs.iter()
		.map(|(a, id)| (a.channel(), a.device(), id.model.as_str()))
		.collect();
	assert_eq!(found, vec![
		(0, 0, "ST3200822A"),
		(2, 1, "Maxtor 6Y080L0"),
	]);

	// absent addresses were never sent anything
	assert!(chan.sent.borrow().iter().all(|(a, _)| chan.is_present(*a)));
	assert_eq!(enumerate::list_devices(&chan).unwrap().len(), 2);
}

#[test]
fn list_without_channels() {
	let chan = Recorder::new(0);
	assert!(chan.list_devices().unwrap().is_empty());
	assert_eq!(enumerate::max_channel(&chan).unwrap(), 0);

	let mut chan = Recorder::new(1);
	chan.channels = None;
	assert!(matches!(chan.list_devices(), Err(Error::QueryFailed("maximum channel", _))));
	assert!(matches!(enumerate::max_channel(&chan), Err(Error::QueryFailed(_, _))));
}

#[test]
fn open_and_close() {
	let mut chan = Recorder::open().unwrap();
	assert_eq!(chan.max_channel().unwrap(), 1);
	chan.close();
	chan.close();
	assert!(chan.closed);
}
