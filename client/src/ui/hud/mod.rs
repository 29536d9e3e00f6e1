pub mod debug;
pub mod loading_overlay;
pub mod reticle;
pub mod toast;
