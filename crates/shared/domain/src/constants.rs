//! Textual names of the built-in loading domains.

pub const BOOT: &str = "BOOT";
pub const PLATFORM: &str = "PLATFORM";
pub const APPLICATION: &str = "APPLICATION";
