#[cfg_attr(test, macro_use)]
extern crate bson;

pub mod config;
pub mod declarations;
pub mod metadata;
pub mod ops;
pub mod utils;
