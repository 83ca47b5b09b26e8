#![forbid(unsafe_code)]

pub mod domain;
pub mod infra;
mod run;
#[cfg(test)]
mod tests;

pub use {
    domain::{Error, Positions},
    run::{execute, run, start},
};
