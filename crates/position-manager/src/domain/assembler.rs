//! Turns contract calls into an estimated, buffered transaction.

use {
    super::{
        Error,
        eth::{Address, Bytes, Ether, FlowType, Gas, GasPrice, TransactionDescriptor, Tx, U256},
    },
    crate::infra::{
        blockchain::{Node, contracts::INonfungiblePositionManager},
        observe,
    },
    alloy::sol_types::SolCall,
};

/// What a transaction does, which decides the safety margin put on top of
/// its gas estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Approve,
    Liquidity,
}

impl Kind {
    pub fn gas_buffer_percent(self) -> u64 {
        match self {
            Self::Approve => 25,
            Self::Liquidity => 10,
        }
    }
}

/// Packs calls to the same contract into one payload. A single call is sent
/// as is, several are wrapped into `multicall(bytes[])`.
pub fn bundle(calls: Vec<Bytes>) -> Result<Bytes, Error> {
    if calls.len() > 1 {
        return Ok(INonfungiblePositionManager::multicallCall { data: calls }
            .abi_encode()
            .into());
    }
    calls
        .into_iter()
        .next()
        .ok_or_else(|| Error::Encoding("no calls to send".to_string()))
}

pub fn tx(from: Address, to: Address, value: Ether, calls: Vec<Bytes>) -> Result<Tx, Error> {
    Ok(Tx {
        from,
        to,
        value,
        input: bundle(calls)?,
    })
}

/// A transaction together with the node's gas estimate for it.
#[derive(Debug, Clone)]
pub struct Estimated {
    pub tx: Tx,
    pub gas: Gas,
    pub kind: Kind,
}

pub async fn estimate(node: &dyn Node, tx: Tx, kind: Kind) -> Result<Estimated, Error> {
    let gas = node.estimate_gas(&tx).await.map_err(|err| {
        let err = Error::from(err);
        observe::estimation_failed(&tx, &err);
        err
    })?;
    observe::estimated(&tx, gas);
    Ok(Estimated { tx, gas, kind })
}

impl Estimated {
    /// The fee of the unbuffered estimate at `gas_price`.
    pub fn fee(&self, gas_price: GasPrice) -> Result<U256, Error> {
        self.gas
            .fee(gas_price)
            .ok_or_else(|| Error::validation("gas fee overflows"))
    }

    /// The same estimate for a transaction with different content.
    pub fn replace(self, tx: Tx) -> Self {
        Self { tx, ..self }
    }

    pub fn into_descriptor(
        self,
        gas_price: GasPrice,
        flow: FlowType,
    ) -> Result<TransactionDescriptor, Error> {
        let gas = self
            .gas
            .with_buffer(self.kind.gas_buffer_percent())
            .ok_or_else(|| Error::validation("gas limit overflows"))?;
        Ok(TransactionDescriptor {
            from: self.tx.from,
            to: self.tx.to,
            value: self.tx.value,
            data: self.tx.input,
            gas,
            gas_price,
            flow,
        })
    }
}
