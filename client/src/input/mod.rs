pub mod data;
pub mod gamepad;
pub mod keyboard;
