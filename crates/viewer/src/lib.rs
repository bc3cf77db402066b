// Terminal front end for the game log engine.

pub mod cli;
pub mod conf;
pub mod render;
pub mod runtime;
