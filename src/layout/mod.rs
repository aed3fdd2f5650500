//! Text layout utilities: the line breaker that partitions styled runs
//! into lines fitting a width, and the plain-text wrappers used by
//! headings, simple text, and table cells.

mod line;

pub use line::*;
