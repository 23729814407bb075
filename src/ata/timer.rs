/*!
Conversion between minutes and the value of IDLE/STANDBY timer register.

The register is not linear:

| value    | timeout                          |
|----------|----------------------------------|
| 0        | timer disabled                   |
| 1..=240  | `value * 5` seconds (up to 20 min) |
| 241..    | 30-minute steps                  |
| 252      | 21 minutes                       |

Note that the 30-minute band is computed as `241 + minutes/30`, so 330 minutes ends up at 252, same as 21 minutes. Do not try to invert [`encode`](fn.encode.html) blindly.

Additionally, [`IMMEDIATE`](constant.IMMEDIATE.html) (300 minutes) is not a timeout at all: it asks to spin the drive down right away, which takes precedence over the 30-minute rule.
*/

use std::time::Duration;

use crate::Error;

/// Pseudo-duration that asks for IDLE IMMEDIATE/STANDBY IMMEDIATE instead of arming the timer
pub const IMMEDIATE: u32 = 300;

/// Longest timeout that can be set, in minutes
pub const MAX_MINUTES: u32 = 330;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum TimerEncoding {
	/// Value to put into the sector count register
	Register(u8),
	Immediate,
}

impl TimerEncoding {
	/// Returns register value, or the [`IMMEDIATE`](constant.IMMEDIATE.html) marker itself (which does not fit into 8 bits).
	pub fn value(&self) -> u16 {
		match *self {
			TimerEncoding::Register(v) => v as u16,
			TimerEncoding::Immediate => IMMEDIATE as u16,
		}
	}

	pub fn is_disabled(&self) -> bool {
		*self == TimerEncoding::Register(0)
	}

	/// Timeout the drive ends up with, as per [`decode`](fn.decode.html); `None` for [`Immediate`](#variant.Immediate).
	pub fn timeout(&self) -> Option<Duration> {
		match *self {
			TimerEncoding::Register(v) => decode(v),
			TimerEncoding::Immediate => None,
		}
	}
}

pub fn is_immediate(minutes: u32) -> bool {
	minutes == IMMEDIATE
}

/// Returns timer encoding for the timeout of `minutes`.
///
/// ## Errors
///
/// [`Error::InvalidDuration`](../../enum.Error.html) for 22–29 minutes, for values above 30 minutes that are not multiples of 30, and for anything longer than 5½ hours.
pub fn encode(minutes: u32) -> Result<TimerEncoding, Error> {
	if is_immediate(minutes) {
		return Ok(TimerEncoding::Immediate);
	}

	match minutes {
		0 => Ok(TimerEncoding::Register(0)),
		// 5 second granularity
		1 ..= 20 => Ok(TimerEncoding::Register((minutes * 60 / 5) as u8)),
		21 => Ok(TimerEncoding::Register(252)),
		22 ..= 29 => Err(Error::InvalidDuration(minutes)),
		_ => {
			if minutes % 30 != 0 || minutes > MAX_MINUTES {
				return Err(Error::InvalidDuration(minutes));
			}
			Ok(TimerEncoding::Register((241 + minutes / 30) as u8))
		},
	}
}

/// Converts register value back into the timeout, as understood by [`encode`](fn.encode.html). Returns `None` for values `encode` never produces.
///
/// 252 is always treated as 21 minutes.
pub fn decode(value: u8) -> Option<Duration> {
	match value {
		0 => Some(Duration::from_secs(0)),
		1 ..= 240 => Some(Duration::from_secs(value as u64 * 5)),
		242 ..= 251 => Some(Duration::from_secs((value as u64 - 241) * 30 * 60)),
		252 => Some(Duration::from_secs(21 * 60)),
		_ => None,
	}
}
