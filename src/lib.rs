/*!
This crate allows you to tune power management of ATA drives (idle and standby spindown timers, Advanced Power Management, Automatic Acoustic Management), and to interpret what drives report about themselves.

## Example

```no_run
use ataidle::channel::{Channel, DeviceAddress, PlatformChannel};
use ataidle::misc::Misc;

let chan = PlatformChannel::open().unwrap();
let addr = DeviceAddress::new(0, 0).unwrap();

// spin down after an hour of inactivity
chan.set_idle(addr, 60).unwrap();
```

Commands are sent through [`channel::Channel`](channel/trait.Channel.html), which is implemented once per platform (a shared `/dev/ata` control device on FreeBSD, per-drive device files on Linux).
Porcelain operations live in [`misc::Misc`](misc/trait.Misc.html), and pure encoders/decoders in the [`ata`](ata/index.html) module.
*/

#![warn(missing_debug_implementations)]

#[cfg(feature = "serializable")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;

/// Data transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction { None, From }

mod error;
pub use crate::error::Error;

pub mod ata;
pub mod channel;
pub mod enumerate;
pub mod misc;

pub mod utils;
