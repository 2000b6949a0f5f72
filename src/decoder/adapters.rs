use solana_pubkey::Pubkey;

use crate::accounts::ResolvedAccountList;
use crate::decoder::DecodedInstruction;
use crate::programs::Program;
use crate::programs::pump_fun::PumpFunDecoder;
use crate::programs::token::TokenDecoder;

/// Per-program payload decoder, selected by [`decoder_for`].
pub trait ProgramDecoder: Sync {
    fn program(&self) -> Program;

    fn decode(
        &self,
        program_id: &Pubkey,
        data: &[u8],
        account_indexes: &[u8],
        accounts: &ResolvedAccountList,
    ) -> DecodedInstruction;
}

pub fn decoder_for(program: Program) -> &'static dyn ProgramDecoder {
    match program {
        Program::Token => &TokenDecoder,
        Program::PumpFun => &PumpFunDecoder,
    }
}
