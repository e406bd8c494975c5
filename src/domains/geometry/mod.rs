pub mod boundary;
pub mod vector;

pub use boundary::*;
pub use vector::*;
