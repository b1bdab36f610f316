pub mod modes;
pub mod simulate;
