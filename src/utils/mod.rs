pub mod date;
pub mod messaging;
