//! Runtime module: boot, input and run.

pub mod boot;
pub mod input;
pub mod run;
