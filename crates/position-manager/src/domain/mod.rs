pub mod assembler;
pub mod calls;
pub mod coin;
pub mod error;
pub mod eth;
pub mod fees;
pub mod lifecycle;
pub mod liquidity;
pub mod position;
pub mod preflight;
pub mod price;
pub mod quote;
pub mod tick;
pub mod valuation;

pub use {
    coin::{Amount, Coin, ResolvedCoin, Token},
    error::Error,
    lifecycle::Positions,
    position::{Pool, Position, Side, TokenId},
    tick::{FeeTier, Range, Tick},
};
