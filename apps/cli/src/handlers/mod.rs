pub mod define;
pub mod membership;
pub mod resolve;
