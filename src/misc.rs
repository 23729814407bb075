/*!
Porcelain: things one actually wants to do with a drive.

[`Misc`](trait.Misc.html) is implemented for every [`Channel`](../channel/trait.Channel.html), so the following is enough:

```no_run
use ataidle::channel::{Channel, DeviceAddress, PlatformChannel};
use ataidle::misc::Misc;

let chan = PlatformChannel::open().unwrap();
let addr = DeviceAddress::new(1, 0).unwrap();

chan.set_standby(addr, 20).unwrap();
chan.set_acoustic(addr, 0).unwrap(); // turn AAM off
```

Every operation checks whether the drive is present before anything else, and fails with [`Error::DeviceAbsent`](../enum.Error.html) without sending any commands if it is not.
*/

use crate::ata::{CommandKind, Feature};
use crate::ata::data::id::{self, Id};
use crate::ata::timer::{self, TimerEncoding};
use crate::channel::{Channel, DeviceAddress};
use crate::enumerate;
use crate::Error;

/// Highest value for [`set_acoustic`](trait.Misc.html#method.set_acoustic)
pub const ACOUSTIC_MAX: u32 = 127;
/// Added to the acoustic value to get the level drive understands (128, quietest, to 254, fastest)
pub const ACOUSTIC_OFFSET: u8 = 127;
/// Highest value for [`set_apm`](trait.Misc.html#method.set_apm)
pub const APM_MAX: u32 = 254;

/// Outcome of SET FEATURES for levelled features (APM, AAM)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Level {
	Disabled,
	/// Level as sent to the drive
	Enabled(u8),
}

fn set_timer<C: Channel + ?Sized>(
	chan: &C,
	addr: DeviceAddress,
	minutes: u32,
	timed: fn(u8) -> CommandKind,
	immediate: CommandKind,
) -> Result<TimerEncoding, Error> {
	chan.require(addr)?;

	let encoding = timer::encode(minutes)?;
	let cmd = match encoding {
		TimerEncoding::Register(value) => timed(value),
		TimerEncoding::Immediate => immediate,
	};
	chan.send(addr, cmd)?;

	Ok(encoding)
}

// caller is expected to have checked presence already
fn set_level<C: Channel + ?Sized>(
	chan: &C,
	addr: DeviceAddress,
	level: Level,
	enable: Feature,
	disable: Feature,
) -> Result<Level, Error> {
	let cmd = match level {
		Level::Enabled(level) => CommandKind::SetFeatures(enable, level),
		// sector count is ignored by the drive here
		Level::Disabled => CommandKind::SetFeatures(disable, 0),
	};
	chan.send(addr, cmd)?;

	Ok(level)
}

pub trait Misc: Channel {
	/// Asks the drive to identify itself, using IDENTIFY DEVICE, or IDENTIFY PACKET DEVICE if the former fails (as it does for ATAPI devices).
	///
	/// ## Errors
	///
	/// * [`Error::DeviceAbsent`](../enum.Error.html),
	/// * [`Error::QueryFailed`](../enum.Error.html) if both IDENTIFY commands failed.
	fn identify(&self, addr: DeviceAddress) -> Result<Id, Error> {
		let data = match self.issue(addr, CommandKind::Identify) {
			Ok(data) => data,
			Err(Error::CommandFailed(_, err)) => {
				info!("{}: IDENTIFY DEVICE failed ({}), trying IDENTIFY PACKET DEVICE", addr, err);
				self.send(addr, CommandKind::IdentifyPacket).map_err(|err| match err {
					Error::CommandFailed(_, err) => Error::QueryFailed("device identity", err),
					err => err,
				})?
			},
			Err(err) => return Err(err),
		};

		Ok(id::parse_id(&data))
	}

	/// Same as [`identify`](#method.identify), but a blank reply (zero configuration word) is reported as [`Error::DeviceAbsent`](../enum.Error.html): there's no drive that would send one.
	fn device_info(&self, addr: DeviceAddress) -> Result<Id, Error> {
		let id = self.identify(addr)?;
		if !id.is_present() {
			return Err(Error::DeviceAbsent(addr));
		}
		Ok(id)
	}

	/// Arms the idle timer, or puts the drive into idle mode right away if `minutes` is [`timer::IMMEDIATE`](../ata/timer/constant.IMMEDIATE.html). 0 disables the timer.
	///
	/// Returns the encoding that was sent.
	fn set_idle(&self, addr: DeviceAddress, minutes: u32) -> Result<TimerEncoding, Error> {
		set_timer(self, addr, minutes, CommandKind::Idle, CommandKind::IdleImmediate)
	}

	/// Same as [`set_idle`](#method.set_idle), but for the standby timer (the drive spins down).
	fn set_standby(&self, addr: DeviceAddress, minutes: u32) -> Result<TimerEncoding, Error> {
		set_timer(self, addr, minutes, CommandKind::Standby, CommandKind::StandbyImmediate)
	}

	/// Sets Automatic Acoustic Management level: 1 is the quietest, 127 is the fastest, 0 turns AAM off.
	///
	/// ## Errors
	///
	/// [`Error::InvalidLevel`](../enum.Error.html) for values above [`ACOUSTIC_MAX`](constant.ACOUSTIC_MAX.html).
	fn set_acoustic(&self, addr: DeviceAddress, value: u32) -> Result<Level, Error> {
		self.require(addr)?;

		if value > ACOUSTIC_MAX {
			return Err(Error::InvalidLevel("acoustic", value, ACOUSTIC_MAX));
		}
		let level = match value {
			0 => Level::Disabled,
			v => Level::Enabled(v as u8 + ACOUSTIC_OFFSET),
		};

		set_level(self, addr, level, Feature::EnableAcoustic, Feature::DisableAcoustic)
	}

	/// Sets Advanced Power Management level: 1 is the most aggressive power saving, 254 is maximum performance, 0 turns APM off.
	///
	/// Levels 1 to 127 permit the drive to spin down on its own.
	///
	/// ## Errors
	///
	/// [`Error::InvalidLevel`](../enum.Error.html) for values above [`APM_MAX`](constant.APM_MAX.html).
	fn set_apm(&self, addr: DeviceAddress, value: u32) -> Result<Level, Error> {
		self.require(addr)?;

		if value > APM_MAX {
			return Err(Error::InvalidLevel("APM", value, APM_MAX));
		}
		let level = match value {
			0 => Level::Disabled,
			v => Level::Enabled(v as u8),
		};

		set_level(self, addr, level, Feature::EnableAPM, Feature::DisableAPM)
	}

	/// See [`enumerate::list_devices`](../enumerate/fn.list_devices.html).
	fn list_devices(&self) -> Result<Vec<(DeviceAddress, Id)>, Error> {
		enumerate::list_devices(self)
	}
}

impl<C: Channel + ?Sized> Misc for C {}
