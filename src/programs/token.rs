use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::accounts::{AccountRef, ResolvedAccountList};
use crate::decoder::adapters::ProgramDecoder;
use crate::decoder::{DecodedInstruction, UnrecognizedInstruction};
use crate::programs::{Program, read_u64_le};

pub const TRANSFER_DISCRIMINATOR: u8 = 3;
pub const TRANSFER_CHECKED_DISCRIMINATOR: u8 = 12;

const TRANSFER_DATA_LEN: usize = 9;
const TRANSFER_ACCOUNTS: usize = 3;
const TRANSFER_CHECKED_DATA_LEN: usize = 10;
const TRANSFER_CHECKED_ACCOUNTS: usize = 4;

/// SPL token `Transfer`. Amount is raw, not scaled by mint decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferInstruction {
    pub amount: u64,
    pub from: AccountRef,
    pub to: AccountRef,
    pub authority: AccountRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferCheckedInstruction {
    pub amount: u64,
    pub decimals: u8,
    pub from: AccountRef,
    pub mint: AccountRef,
    pub to: AccountRef,
    pub authority: AccountRef,
}

pub struct TokenDecoder;

impl ProgramDecoder for TokenDecoder {
    fn program(&self) -> Program {
        Program::Token
    }

    fn decode(
        &self,
        program_id: &Pubkey,
        data: &[u8],
        account_indexes: &[u8],
        accounts: &ResolvedAccountList,
    ) -> DecodedInstruction {
        match data.first().copied() {
            Some(TRANSFER_DISCRIMINATOR) => {
                if let Some(transfer) = decode_transfer(data, account_indexes, accounts) {
                    return DecodedInstruction::Transfer(transfer);
                }
            }
            Some(TRANSFER_CHECKED_DISCRIMINATOR) => {
                if let Some(transfer) = decode_transfer_checked(data, account_indexes, accounts) {
                    return DecodedInstruction::TransferChecked(transfer);
                }
            }
            _ => {}
        }

        DecodedInstruction::Unrecognized(UnrecognizedInstruction::new(
            program_id,
            data,
            account_indexes,
            accounts,
        ))
    }
}

/// `None` when the payload or account list is too short for a transfer.
pub fn decode_transfer(
    data: &[u8],
    account_indexes: &[u8],
    accounts: &ResolvedAccountList,
) -> Option<TransferInstruction> {
    if data.len() < TRANSFER_DATA_LEN || account_indexes.len() < TRANSFER_ACCOUNTS {
        return None;
    }
    let amount = read_u64_le(data, 1)?;
    let [from, to, authority] = resolve_fixed::<3>(account_indexes, accounts)?;

    Some(TransferInstruction {
        amount,
        from,
        to,
        authority,
    })
}

pub fn decode_transfer_checked(
    data: &[u8],
    account_indexes: &[u8],
    accounts: &ResolvedAccountList,
) -> Option<TransferCheckedInstruction> {
    if data.len() < TRANSFER_CHECKED_DATA_LEN
        || account_indexes.len() < TRANSFER_CHECKED_ACCOUNTS
    {
        return None;
    }
    let amount = read_u64_le(data, 1)?;
    let decimals = *data.get(9)?;
    let [from, mint, to, authority] = resolve_fixed::<4>(account_indexes, accounts)?;

    Some(TransferCheckedInstruction {
        amount,
        decimals,
        from,
        mint,
        to,
        authority,
    })
}

fn resolve_fixed<const N: usize>(
    account_indexes: &[u8],
    accounts: &ResolvedAccountList,
) -> Option<[AccountRef; N]> {
    let head = account_indexes.get(..N)?;
    accounts.resolve_indexes(head).try_into().ok()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, clippy::panic, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::types::parse_pubkey;

    fn key(seed: u8) -> Pubkey {
        Pubkey::new_from_array([seed; 32])
    }

    fn token_program() -> Pubkey {
        parse_pubkey(crate::programs::TOKEN_PROGRAM_ID).unwrap()
    }

    fn accounts() -> ResolvedAccountList {
        ResolvedAccountList::new(vec![key(1), key(2), key(3), key(4)])
    }

    fn decode(data: &[u8], indexes: &[u8]) -> DecodedInstruction {
        TokenDecoder.decode(&token_program(), data, indexes, &accounts())
    }

    #[test]
    fn transfer_reads_high_byte_amount_and_accounts() {
        let data = [3u8, 0, 0, 0, 0, 0, 0, 0, 1];
        let DecodedInstruction::Transfer(transfer) = decode(&data, &[0, 1, 2]) else {
            panic!("expected transfer");
        };
        assert_eq!(transfer.amount, 1 << 56);
        assert_eq!(transfer.from.key(), Some(&key(1)));
        assert_eq!(transfer.to.key(), Some(&key(2)));
        assert_eq!(transfer.authority.key(), Some(&key(3)));
    }

    #[test]
    fn transfer_amount_is_little_endian() {
        let amount: u64 = 1_234_567_890_123;
        let mut data = vec![TRANSFER_DISCRIMINATOR];
        data.extend_from_slice(&amount.to_le_bytes());
        data.extend_from_slice(&[0xFF, 0xFF]);

        let DecodedInstruction::Transfer(transfer) = decode(&data, &[3, 2, 1, 0]) else {
            panic!("expected transfer");
        };
        assert_eq!(transfer.amount, amount);
        assert_eq!(transfer.from.key(), Some(&key(4)));
        assert_eq!(transfer.to.key(), Some(&key(3)));
        assert_eq!(transfer.authority.key(), Some(&key(2)));
    }

    #[test]
    fn transfer_with_out_of_range_account_still_decodes() {
        let data = [3u8, 5, 0, 0, 0, 0, 0, 0, 0];
        let DecodedInstruction::Transfer(transfer) = decode(&data, &[0, 200, 2]) else {
            panic!("expected transfer");
        };
        assert_eq!(transfer.amount, 5);
        assert!(transfer.from.is_resolved());
        assert_eq!(transfer.to, AccountRef::OutOfRange { index: 200 });
        assert!(transfer.authority.is_resolved());
    }

    #[test]
    fn short_transfer_falls_back_to_unrecognized() {
        let short_data = [3u8, 1, 0, 0, 0, 0, 0, 0];
        let DecodedInstruction::Unrecognized(ix) = decode(&short_data, &[0, 1, 2]) else {
            panic!("expected unrecognized");
        };
        assert_eq!(ix.discriminator, Some(3));
        assert_eq!(ix.raw_data, short_data);

        let full_data = [3u8, 1, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            decode(&full_data, &[0, 1]),
            DecodedInstruction::Unrecognized(_)
        ));
    }

    #[test]
    fn other_discriminators_are_unrecognized_and_keep_raw_bytes() {
        for discriminator in [0u8, 1, 7, 9, 255] {
            let data = [discriminator, 9, 8, 7, 6, 5, 4, 3, 2, 1];
            let DecodedInstruction::Unrecognized(ix) = decode(&data, &[0, 9]) else {
                panic!("expected unrecognized for {discriminator}");
            };
            assert_eq!(ix.discriminator, Some(discriminator));
            assert_eq!(ix.raw_data, data);
            assert_eq!(ix.accounts.len(), 2);
            assert_eq!(ix.accounts[1], AccountRef::OutOfRange { index: 9 });
        }
    }

    #[test]
    fn empty_data_is_unrecognized_without_discriminator() {
        let DecodedInstruction::Unrecognized(ix) = decode(&[], &[0]) else {
            panic!("expected unrecognized");
        };
        assert_eq!(ix.discriminator, None);
        assert!(ix.raw_data.is_empty());
        assert_eq!(ix.program_id, token_program());
    }

    #[test]
    fn transfer_checked_reads_decimals_and_mint() {
        let mut data = vec![TRANSFER_CHECKED_DISCRIMINATOR];
        data.extend_from_slice(&42_000_000u64.to_le_bytes());
        data.push(6);

        let DecodedInstruction::TransferChecked(transfer) = decode(&data, &[0, 1, 2, 3]) else {
            panic!("expected transfer checked");
        };
        assert_eq!(transfer.amount, 42_000_000);
        assert_eq!(transfer.decimals, 6);
        assert_eq!(transfer.from.key(), Some(&key(1)));
        assert_eq!(transfer.mint.key(), Some(&key(2)));
        assert_eq!(transfer.to.key(), Some(&key(3)));
        assert_eq!(transfer.authority.key(), Some(&key(4)));
    }

    #[test]
    fn transfer_checked_missing_decimals_is_unrecognized() {
        let mut data = vec![TRANSFER_CHECKED_DISCRIMINATOR];
        data.extend_from_slice(&1u64.to_le_bytes());
        assert!(matches!(
            decode(&data, &[0, 1, 2, 3]),
            DecodedInstruction::Unrecognized(_)
        ));
    }
}
