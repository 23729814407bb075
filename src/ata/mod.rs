/*!
All things ATA: command opcodes, SET FEATURES subcodes, register files.

* Use [`timer`](timer/index.html) to turn minutes into IDLE/STANDBY timer values.
* Use [`data` module](data/index.html) to parse IDENTIFY DEVICE replies.
* Use [`CommandKind`](enum.CommandKind.html) to describe a command, and [`channel::Channel`](../channel/trait.Channel.html) to send it.
*/

pub mod data;
pub mod timer;

use crate::Direction;

/// How long to wait for a single command to complete, in seconds. Only advisory: not every transport can honor it.
pub const CMD_TIMEOUT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	Identify = 0xec,
	IdentifyPacket = 0xa1,
	SetFeatures = 0xef,
	Idle = 0xe3,
	IdleImmediate = 0xe1,
	Standby = 0xe2,
	StandbyImmediate = 0xe0,
}

/// SET FEATURES subcommands, written into the feature register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
	EnableAPM = 0x05,
	DisableAPM = 0x85,
	// AAM shares SET FEATURES with APM, it's only the subcode that differs
	EnableAcoustic = 0x42,
	DisableAcoustic = 0xc2,
}

// data port is omitted for obvious reasons; so are LBA and device registers, which none of the commands here need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistersWrite {
	pub command: u8,
	pub features: u8,
	pub sector_count: u8,

	pub timeout: u32, // seconds
}

/// Commands this crate knows how to issue, along with their parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
	Identify,
	/// IDENTIFY PACKET DEVICE, for ATAPI devices that abort plain IDENTIFY
	IdentifyPacket,
	/// Arms idle timer with the value from [`timer::encode`](timer/fn.encode.html)
	Idle(u8),
	IdleImmediate,
	/// Arms standby timer with the value from [`timer::encode`](timer/fn.encode.html)
	Standby(u8),
	StandbyImmediate,
	/// Subcommand and its level (sector count register)
	SetFeatures(Feature, u8),
}

impl CommandKind {
	pub fn command(&self) -> Command {
		use self::CommandKind::*;
		match *self {
			Identify => Command::Identify,
			IdentifyPacket => Command::IdentifyPacket,
			Idle(_) => Command::Idle,
			IdleImmediate => Command::IdleImmediate,
			Standby(_) => Command::Standby,
			StandbyImmediate => Command::StandbyImmediate,
			SetFeatures(_, _) => Command::SetFeatures,
		}
	}

	pub fn name(&self) -> &'static str {
		match self.command() {
			Command::Identify => "IDENTIFY DEVICE",
			Command::IdentifyPacket => "IDENTIFY PACKET DEVICE",
			Command::SetFeatures => "SET FEATURES",
			Command::Idle => "IDLE",
			Command::IdleImmediate => "IDLE IMMEDIATE",
			Command::Standby => "STANDBY",
			Command::StandbyImmediate => "STANDBY IMMEDIATE",
		}
	}

	/// IDENTIFY variants read one 512-byte sector of data, the rest are non-data commands.
	pub fn direction(&self) -> Direction {
		match *self {
			CommandKind::Identify | CommandKind::IdentifyPacket => Direction::From,
			_ => Direction::None,
		}
	}

	pub fn registers(&self) -> RegistersWrite {
		let (features, sector_count) = match *self {
			CommandKind::Idle(timer) | CommandKind::Standby(timer) => (0, timer),
			CommandKind::SetFeatures(feature, level) => (feature as u8, level),
			_ => (0, 0),
		};

		RegistersWrite {
			command: self.command() as u8,
			features,
			sector_count,
			timeout: CMD_TIMEOUT,
		}
	}
}
