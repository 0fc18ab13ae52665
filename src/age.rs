//! Age calculator: birth-date parsing, validation and calendar arithmetic.
//!
//! The pieces are pure functions over `CalendarDate`; the `tempo age`
//! command is the only caller that touches the clock.

mod calc;
mod date;
mod input;

pub use calc::*;
pub use date::*;
pub use input::*;

#[cfg(test)]
mod tests;
