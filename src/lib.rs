pub mod data_handling;
pub mod error;
pub mod util;
