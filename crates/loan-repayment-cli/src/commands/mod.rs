pub mod calculate;
pub mod options;
pub mod quote;
