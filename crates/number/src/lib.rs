//! Big number helpers shared by the workspace: exact conversions between
//! on-chain integers and arbitrary precision numbers, token unit scaling and
//! the wire formats used when handing numbers to other systems.

pub mod conversions;
pub mod serialization;
pub mod u256_ext;
pub mod units;
