use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::accounts::ResolvedAccountList;
use crate::accounts::resolver::{TableFetcher, resolve_account_list};
use crate::decoder::{DecodedInstruction, decode_instruction};
use crate::error::Error;
use crate::programs::Program;
use crate::types::{TransactionEnvelope, pubkey_to_string, serialize_pubkey};

/// A decoded inner instruction and where it sits in the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedInnerInstruction {
    /// Index of the top-level instruction that issued this CPI.
    pub parent_index: u8,
    /// Position within the parent's inner instruction list.
    pub position: usize,
    pub program: Program,
    #[serde(serialize_with = "serialize_pubkey")]
    pub program_id: Pubkey,
    pub instruction: DecodedInstruction,
}

/// Resolve the account list of `tx` and decode every inner instruction of a known program.
///
/// When the envelope already carries loaded addresses the fetcher is not called.
pub fn decode_transaction<F>(
    tx: &TransactionEnvelope,
    fetcher: &F,
) -> Result<Vec<DecodedInnerInstruction>, Error>
where
    F: TableFetcher + ?Sized,
{
    if !tx.has_inner_instructions() {
        return Err(Error::EmptyTransaction);
    }

    let accounts = match &tx.loaded_addresses {
        Some(loaded) => ResolvedAccountList::from_loaded_addresses(
            &tx.account_keys,
            &loaded.writable,
            &loaded.readonly,
        ),
        None => resolve_account_list(&tx.account_keys, &tx.address_table_lookups, fetcher),
    };

    decode_transaction_with_accounts(tx, &accounts)
}

/// Decode inner instructions against an already resolved account list.
///
/// Instructions whose program id index is out of range, or whose program has
/// no decoder, are skipped.
pub fn decode_transaction_with_accounts(
    tx: &TransactionEnvelope,
    accounts: &ResolvedAccountList,
) -> Result<Vec<DecodedInnerInstruction>, Error> {
    if !tx.has_inner_instructions() {
        return Err(Error::EmptyTransaction);
    }

    let mut decoded = Vec::new();
    for group in &tx.inner_instructions {
        for (position, ix) in group.instructions.iter().enumerate() {
            let Some(program_id) = accounts.get(usize::from(ix.program_id_index)) else {
                tracing::warn!(
                    parent_index = group.index,
                    position,
                    program_id_index = ix.program_id_index,
                    len = accounts.len(),
                    "program id index out of range"
                );
                continue;
            };

            let Some(program) = Program::from_program_id(program_id) else {
                tracing::debug!(
                    parent_index = group.index,
                    position,
                    program_id = %pubkey_to_string(program_id),
                    "passing through instruction of unknown program"
                );
                continue;
            };

            decoded.push(DecodedInnerInstruction {
                parent_index: group.index,
                position,
                program,
                program_id: *program_id,
                instruction: decode_instruction(program_id, &ix.data, &ix.accounts, accounts),
            });
        }
    }

    Ok(decoded)
}
