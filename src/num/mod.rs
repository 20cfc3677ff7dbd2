pub mod number;

pub use number::{compare_numbers, format_number};
