pub mod time;

pub use time::{format_kickoff, format_local_timestamp};
