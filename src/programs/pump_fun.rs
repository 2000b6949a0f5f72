use serde::Serialize;
use solana_pubkey::Pubkey;

use crate::accounts::ResolvedAccountList;
use crate::decoder::adapters::ProgramDecoder;
use crate::decoder::{DecodedInstruction, UnrecognizedInstruction};
use crate::error::Error;
use crate::programs::{Program, read_u64_le};

/// Anchor discriminator of the bonding-curve `buy` instruction.
pub const BUY_DISCRIMINATOR: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BondingCurvePayload {
    pub amount: u64,
    pub max_cost: u64,
}

/// Field layout of a bonding-curve payload.
///
/// `Anchor` payloads carry the 8-byte instruction discriminator before the
/// fields; `Bare` payloads start directly at `amount`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum BondingCurveLayout {
    #[default]
    Anchor,
    Bare,
}

impl BondingCurveLayout {
    pub fn amount_offset(self) -> usize {
        match self {
            Self::Anchor => BUY_DISCRIMINATOR.len(),
            Self::Bare => 0,
        }
    }

    pub fn min_len(self) -> usize {
        self.amount_offset() + 16
    }
}

/// Base58-decode `encoded` and read it with the default [`BondingCurveLayout`].
pub fn decode_bonding_curve_payload(encoded: &str) -> Result<BondingCurvePayload, Error> {
    decode_bonding_curve_payload_with(encoded, BondingCurveLayout::default())
}

pub fn decode_bonding_curve_payload_with(
    encoded: &str,
    layout: BondingCurveLayout,
) -> Result<BondingCurvePayload, Error> {
    let data = bs58::decode(encoded).into_vec()?;
    decode_bonding_curve_bytes(&data, layout)
}

pub fn decode_bonding_curve_bytes(
    data: &[u8],
    layout: BondingCurveLayout,
) -> Result<BondingCurvePayload, Error> {
    let insufficient = || Error::InsufficientData {
        expected: layout.min_len(),
        actual: data.len(),
    };
    if data.len() < layout.min_len() {
        return Err(insufficient());
    }

    let offset = layout.amount_offset();
    let amount = read_u64_le(data, offset).ok_or_else(insufficient)?;
    let max_cost = read_u64_le(data, offset + 8).ok_or_else(insufficient)?;

    Ok(BondingCurvePayload { amount, max_cost })
}

pub struct PumpFunDecoder;

impl ProgramDecoder for PumpFunDecoder {
    fn program(&self) -> Program {
        Program::PumpFun
    }

    fn decode(
        &self,
        program_id: &Pubkey,
        data: &[u8],
        account_indexes: &[u8],
        accounts: &ResolvedAccountList,
    ) -> DecodedInstruction {
        if data.starts_with(&BUY_DISCRIMINATOR) {
            match decode_bonding_curve_bytes(data, BondingCurveLayout::Anchor) {
                Ok(payload) => return DecodedInstruction::BondingCurve(payload),
                Err(e) => tracing::warn!(error = %e, "truncated bonding curve buy"),
            }
        }

        DecodedInstruction::Unrecognized(UnrecognizedInstruction::new(
            program_id,
            data,
            account_indexes,
            accounts,
        ))
    }
}
