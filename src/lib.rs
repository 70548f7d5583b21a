#![doc = r#"
A strongly-typed decoder for Standard MIDI Files.

Feed the raw bytes of a `.mid` file to [`Midi::parse`](crate::file::Midi::parse)
and get back the header plus every track, each holding its events in file order.

```rust
use smfdecode::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60,
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0B,
    0x00, 0x90, 0x3C, 0x40,
    0x60, 0x3C, 0x00,
    0x00, 0xFF, 0x2F, 0x00,
];

let midi = Midi::parse(&bytes).unwrap();
assert_eq!(midi.header().format(), FormatType::SingleMultiChannel);
assert_eq!(midi.tracks()[0].events().len(), 3);
```

# Feature flags
- `std` (default): file loading through [`Midi::from_path`](crate::file::Midi::from_path).
  Without it the crate only needs `alloc`.
- `tracing` (default): diagnostics for tolerated oddities (unknown meta events,
  tracks missing an end-of-track marker).
- `serde`: `Serialize`/`Deserialize` for the decoded model.
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod events;
pub mod file;
pub mod message;
pub mod reader;

pub mod prelude;
