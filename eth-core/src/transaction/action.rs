//! Transaction destination.

use alloy_rlp::{BufMut, Decodable, Encodable, EMPTY_STRING_CODE};

use crate::types::Address;

/// What a transaction does with its value and data.
///
/// Encoded as the empty string for contract creation, else the 20-byte
/// recipient address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxAction {
    /// Deploy a contract using the transaction data as init code.
    Create,
    /// Message call to an account.
    Call(Address),
}

impl Encodable for TxAction {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            TxAction::Create => out.put_u8(EMPTY_STRING_CODE),
            TxAction::Call(to) => to.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            TxAction::Create => 1,
            TxAction::Call(to) => to.length(),
        }
    }
}

impl Decodable for TxAction {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        match buf.first() {
            Some(&EMPTY_STRING_CODE) => {
                *buf = &buf[1..];
                Ok(TxAction::Create)
            }
            Some(_) => Address::decode(buf).map(TxAction::Call),
            None => Err(alloy_rlp::Error::InputTooShort),
        }
    }
}
