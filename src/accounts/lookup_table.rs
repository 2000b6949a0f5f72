use solana_pubkey::Pubkey;

use crate::error::Error;
use crate::types::PUBKEY_BYTES;

/// Lookup table account header: 8-byte discriminator plus 56 bytes of metadata.
pub const LOOKUP_TABLE_META_SIZE: usize = 64;

/// Parse the addresses stored in a raw address lookup table account.
///
/// Trailing bytes shorter than one address are ignored.
pub fn parse_lookup_table(data: &[u8]) -> Result<Vec<Pubkey>, Error> {
    let Some(body) = data.get(LOOKUP_TABLE_META_SIZE..) else {
        return Err(Error::TableParse {
            reason: format!(
                "table data is {} bytes, header needs {LOOKUP_TABLE_META_SIZE}",
                data.len()
            ),
        });
    };

    Ok(body
        .chunks_exact(PUBKEY_BYTES)
        .filter_map(|chunk| <[u8; PUBKEY_BYTES]>::try_from(chunk).ok())
        .map(Pubkey::new_from_array)
        .collect())
}
