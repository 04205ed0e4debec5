pub mod common;
pub mod distances2;
