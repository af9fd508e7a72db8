pub mod guidance;
pub mod progression;
