pub mod blockchain;
pub mod cli;
pub mod config;
pub mod observe;
pub mod registry;
pub mod time;

pub use {
    blockchain::{Ethereum, Node},
    config::Config,
    registry::Registry,
};
