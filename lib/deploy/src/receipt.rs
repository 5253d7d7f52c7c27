//! Receipt helpers.
use alloy::{
    network::ReceiptResponse, primitives::Address,
    rpc::types::TransactionReceipt,
};

use crate::Error;

/// Extension trait to check the outcome of a contract creation.
pub trait Ext {
    /// Returns the address of the contract from the [`TransactionReceipt`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingContractAddress`] if there's no contract
    /// address.
    fn address(&self) -> eyre::Result<Address>;

    /// Checks that the transaction executed successfully.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Reverted`] if the receipt status is failure.
    fn ensure_status(&self) -> eyre::Result<()>;
}

impl Ext for TransactionReceipt {
    fn address(&self) -> eyre::Result<Address> {
        self.contract_address().ok_or_else(|| {
            Error::MissingContractAddress { tx_hash: self.transaction_hash }
                .into()
        })
    }

    fn ensure_status(&self) -> eyre::Result<()> {
        if self.status() {
            Ok(())
        } else {
            Err(Error::Reverted { tx_hash: self.transaction_hash }.into())
        }
    }
}
