pub mod pda;
pub mod percentage;
