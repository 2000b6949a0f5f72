use solana_pubkey::Pubkey;

use crate::error::Error;

/// Width of a Solana account address in bytes.
pub const PUBKEY_BYTES: usize = 32;

/// One address lookup table consulted by a v0 transaction.
///
/// Writable indexes are resolved before readonly ones, and each list keeps its
/// on-chain order. Both orders decide where an address lands in the flat
/// account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTableReference {
    pub table_address: Pubkey,
    pub writable_indexes: Vec<u8>,
    pub readonly_indexes: Vec<u8>,
}

/// Addresses an RPC node already loaded from lookup tables (`meta.loadedAddresses`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedAddresses {
    pub writable: Vec<Pubkey>,
    pub readonly: Vec<Pubkey>,
}

/// A compiled instruction: every account is an index into the resolved account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Inner instructions executed as CPIs of the top-level instruction at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerInstructionGroup {
    pub index: u8,
    pub instructions: Vec<CompiledInstruction>,
}

/// A parsed v0 transaction, reduced to what decoding needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub signature: Option<String>,
    pub account_keys: Vec<Pubkey>,
    pub address_table_lookups: Vec<LookupTableReference>,
    /// When present, used instead of fetching the lookup tables.
    pub loaded_addresses: Option<LoadedAddresses>,
    pub inner_instructions: Vec<InnerInstructionGroup>,
}

impl TransactionEnvelope {
    pub fn has_inner_instructions(&self) -> bool {
        self.inner_instructions
            .iter()
            .any(|group| !group.instructions.is_empty())
    }
}

/// One flattened transaction row with base58 keys and data.
///
/// The message and meta fields sit side by side at the top level
/// (`accountKeys`, `addressTableLookups`, `loadedAddresses`,
/// `innerInstructions`). A raw `getTransaction` response nests them under
/// `transaction.message` and `meta`, so it has to be flattened first.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default)]
    pub signature: Option<String>,
    pub account_keys: Vec<String>,
    #[serde(default)]
    pub address_table_lookups: Vec<RawLookupTable>,
    #[serde(default)]
    pub loaded_addresses: Option<RawLoadedAddresses>,
    #[serde(default)]
    pub inner_instructions: Vec<RawInnerInstructionGroup>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLookupTable {
    pub account_key: String,
    #[serde(default)]
    pub writable_indexes: Vec<u8>,
    #[serde(default)]
    pub readonly_indexes: Vec<u8>,
}

#[derive(serde::Deserialize)]
pub struct RawLoadedAddresses {
    #[serde(default)]
    pub writable: Vec<String>,
    #[serde(default)]
    pub readonly: Vec<String>,
}

#[derive(serde::Deserialize)]
pub struct RawInnerInstructionGroup {
    pub index: u8,
    pub instructions: Vec<RawCompiledInstruction>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompiledInstruction {
    pub program_id_index: u8,
    #[serde(default)]
    pub accounts: Vec<u8>,
    /// Base58-encoded instruction data.
    pub data: String,
}

impl RawTransaction {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_envelope(self) -> Result<TransactionEnvelope, Error> {
        let account_keys = parse_pubkeys(&self.account_keys)?;

        let address_table_lookups = self
            .address_table_lookups
            .into_iter()
            .map(|lookup| {
                Ok::<_, Error>(LookupTableReference {
                    table_address: parse_pubkey(&lookup.account_key)?,
                    writable_indexes: lookup.writable_indexes,
                    readonly_indexes: lookup.readonly_indexes,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let loaded_addresses = self
            .loaded_addresses
            .map(|loaded| {
                Ok::<_, Error>(LoadedAddresses {
                    writable: parse_pubkeys(&loaded.writable)?,
                    readonly: parse_pubkeys(&loaded.readonly)?,
                })
            })
            .transpose()?;

        let inner_instructions = self
            .inner_instructions
            .into_iter()
            .map(|group| {
                let instructions = group
                    .instructions
                    .into_iter()
                    .map(|ix| {
                        let data = bs58::decode(&ix.data)
                            .into_vec()
                            .map_err(|e| Error::Parse {
                                reason: format!("invalid base58 instruction data: {e}"),
                            })?;
                        Ok::<_, Error>(CompiledInstruction {
                            program_id_index: ix.program_id_index,
                            accounts: ix.accounts,
                            data,
                        })
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok::<_, Error>(InnerInstructionGroup {
                    index: group.index,
                    instructions,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(TransactionEnvelope {
            signature: self.signature,
            account_keys,
            address_table_lookups,
            loaded_addresses,
            inner_instructions,
        })
    }
}

/// Decode a base58 string into a [`Pubkey`].
pub fn parse_pubkey(value: &str) -> Result<Pubkey, Error> {
    let bytes = bs58::decode(value).into_vec().map_err(|e| Error::Parse {
        reason: format!("invalid base58 pubkey {value}: {e}"),
    })?;
    let actual = bytes.len();
    let array = <[u8; PUBKEY_BYTES]>::try_from(bytes).map_err(|_| Error::Parse {
        reason: format!("pubkey {value} is {actual} bytes, expected {PUBKEY_BYTES}"),
    })?;
    Ok(Pubkey::new_from_array(array))
}

fn parse_pubkeys(values: &[String]) -> Result<Vec<Pubkey>, Error> {
    values.iter().map(|v| parse_pubkey(v)).collect()
}

/// Base58 rendering of a [`Pubkey`].
pub fn pubkey_to_string(key: &Pubkey) -> String {
    bs58::encode(key.to_bytes()).into_string()
}

pub(crate) fn serialize_pubkey<S>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&pubkey_to_string(key))
}
