pub mod adapters;
pub mod transaction;

use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::accounts::{AccountRef, ResolvedAccountList};
use crate::decoder::adapters::decoder_for;
use crate::programs::Program;
use crate::programs::pump_fun::BondingCurvePayload;
use crate::programs::token::{TransferCheckedInstruction, TransferInstruction};
use crate::types::serialize_pubkey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedInstruction {
    Transfer(TransferInstruction),
    TransferChecked(TransferCheckedInstruction),
    BondingCurve(BondingCurvePayload),
    Unrecognized(UnrecognizedInstruction),
}

/// Any (program, discriminator) pair without a dedicated decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedInstruction {
    #[serde(serialize_with = "serialize_pubkey")]
    pub program_id: Pubkey,
    /// `None` only when the instruction carried no data.
    pub discriminator: Option<u8>,
    pub raw_data: Vec<u8>,
    pub accounts: Vec<AccountRef>,
}

impl UnrecognizedInstruction {
    pub fn new(
        program_id: &Pubkey,
        data: &[u8],
        account_indexes: &[u8],
        accounts: &ResolvedAccountList,
    ) -> Self {
        Self {
            program_id: *program_id,
            discriminator: data.first().copied(),
            raw_data: data.to_vec(),
            accounts: accounts.resolve_indexes(account_indexes),
        }
    }
}

/// Decode one instruction whose accounts index into `accounts`.
///
/// Never fails: unknown programs, unknown discriminators and short payloads
/// all come back as [`DecodedInstruction::Unrecognized`].
pub fn decode_instruction(
    program_id: &Pubkey,
    data: &[u8],
    account_indexes: &[u8],
    accounts: &ResolvedAccountList,
) -> DecodedInstruction {
    match Program::from_program_id(program_id) {
        Some(program) => decoder_for(program).decode(program_id, data, account_indexes, accounts),
        None => DecodedInstruction::Unrecognized(UnrecognizedInstruction::new(
            program_id,
            data,
            account_indexes,
            accounts,
        )),
    }
}
