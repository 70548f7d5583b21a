#![doc = r#"
Contains the channel message types found in track chunks
"#]

pub mod channel;
pub use channel::*;
