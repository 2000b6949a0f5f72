#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod accounts;
pub mod decoder;
pub mod error;
pub mod programs;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use accounts::lookup_table::{LOOKUP_TABLE_META_SIZE, parse_lookup_table};
pub use accounts::resolver::{TableFetcher, resolve_account_list};
pub use accounts::{AccountRef, ResolvedAccountList};
pub use decoder::adapters::{ProgramDecoder, decoder_for};
pub use decoder::transaction::{
    DecodedInnerInstruction, decode_transaction, decode_transaction_with_accounts,
};
pub use decoder::{DecodedInstruction, UnrecognizedInstruction, decode_instruction};
pub use error::Error;
pub use programs::pump_fun::{
    BondingCurveLayout, BondingCurvePayload, decode_bonding_curve_bytes,
    decode_bonding_curve_payload, decode_bonding_curve_payload_with,
};
pub use programs::token::{TransferCheckedInstruction, TransferInstruction};
pub use programs::{PUMP_FUN_PROGRAM, PUMP_FUN_PROGRAM_ID, Program, TOKEN_PROGRAM, TOKEN_PROGRAM_ID};
pub use types::{
    CompiledInstruction, InnerInstructionGroup, LoadedAddresses, LookupTableReference,
    RawTransaction, TransactionEnvelope, parse_pubkey, pubkey_to_string,
};
