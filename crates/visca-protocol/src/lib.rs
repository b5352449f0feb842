pub mod commands;
pub mod frame;
pub mod nibble;
pub mod response;
pub mod stream_parser;

pub use commands::{Adjust, Command, CommandCode, InquiryCode, Register};
pub use frame::{Frame, hex, split_frames};
pub use nibble::{combine_nibbles, map_range, split_nibbles, try_split_nibbles};
pub use response::Response;
pub use stream_parser::{DrainFrames, ParserState, StreamParser};
