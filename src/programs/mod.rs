pub mod pump_fun;
pub mod token;

use serde::Serialize;
use solana_pubkey::Pubkey;
use strum::IntoEnumIterator;

pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const PUMP_FUN_PROGRAM_ID: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";

/// Decoded form of [`TOKEN_PROGRAM_ID`].
pub const TOKEN_PROGRAM: Pubkey = Pubkey::new_from_array([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133, 237,
    95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// Decoded form of [`PUMP_FUN_PROGRAM_ID`].
pub const PUMP_FUN_PROGRAM: Pubkey = Pubkey::new_from_array([
    1, 86, 224, 246, 147, 102, 90, 207, 68, 219, 21, 104, 191, 23, 91, 170, 81, 137, 203, 151, 245,
    210, 255, 59, 101, 93, 43, 182, 253, 109, 24, 176,
]);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Program {
    Token,
    PumpFun,
}

impl Program {
    pub fn from_program_id(program_id: &Pubkey) -> Option<Self> {
        Self::iter().find(|program| program.program_id() == *program_id)
    }

    pub fn from_program_id_str(program_id: &str) -> Option<Self> {
        match program_id {
            TOKEN_PROGRAM_ID => Some(Self::Token),
            PUMP_FUN_PROGRAM_ID => Some(Self::PumpFun),
            _ => None,
        }
    }

    pub fn program_id(self) -> Pubkey {
        match self {
            Self::Token => TOKEN_PROGRAM,
            Self::PumpFun => PUMP_FUN_PROGRAM,
        }
    }

    pub fn program_id_str(self) -> &'static str {
        match self {
            Self::Token => TOKEN_PROGRAM_ID,
            Self::PumpFun => PUMP_FUN_PROGRAM_ID,
        }
    }

    pub fn all_program_ids() -> &'static [&'static str] {
        &[TOKEN_PROGRAM_ID, PUMP_FUN_PROGRAM_ID]
    }
}

/// Little-endian `u64` at `offset`, or `None` if the slice is too short.
pub(crate) fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    let bytes: [u8; 8] = data.get(offset..offset.checked_add(8)?)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}
