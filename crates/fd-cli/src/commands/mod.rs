pub mod play;
pub mod verify;
