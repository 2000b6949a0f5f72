use std::collections::HashMap;
use std::hash::BuildHasher;

use solana_pubkey::Pubkey;

use crate::accounts::ResolvedAccountList;
use crate::accounts::lookup_table::parse_lookup_table;
use crate::error::Error;
use crate::types::{LookupTableReference, pubkey_to_string};

/// Source of raw lookup table account data, usually an RPC `getAccountInfo` wrapper.
pub trait TableFetcher {
    fn fetch_table(&self, address: &Pubkey) -> Result<Vec<u8>, Error>;
}

impl<F> TableFetcher for F
where
    F: Fn(&Pubkey) -> Result<Vec<u8>, Error>,
{
    fn fetch_table(&self, address: &Pubkey) -> Result<Vec<u8>, Error> {
        self(address)
    }
}

/// Pre-fetched tables keyed by table address.
impl<S: BuildHasher> TableFetcher for HashMap<Pubkey, Vec<u8>, S> {
    fn fetch_table(&self, address: &Pubkey) -> Result<Vec<u8>, Error> {
        self.get(address).cloned().ok_or_else(|| Error::TableFetch {
            table: pubkey_to_string(address),
            reason: "table not present".into(),
        })
    }
}

/// Build the flat account list of a v0 transaction.
///
/// A table that cannot be fetched or parsed contributes no addresses, and an
/// index outside its table is dropped; neither aborts resolution.
pub fn resolve_account_list<F>(
    static_keys: &[Pubkey],
    lookups: &[LookupTableReference],
    fetcher: &F,
) -> ResolvedAccountList
where
    F: TableFetcher + ?Sized,
{
    let mut resolved = ResolvedAccountList::new(static_keys.to_vec());

    for lookup in lookups {
        let table = pubkey_to_string(&lookup.table_address);

        let data = match fetcher.fetch_table(&lookup.table_address) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "skipping lookup table: fetch failed");
                continue;
            }
        };

        let addresses = match parse_lookup_table(&data) {
            Ok(addresses) => addresses,
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "skipping lookup table: parse failed");
                continue;
            }
        };

        let before = resolved.len();
        append_indexed(&mut resolved, &addresses, &lookup.writable_indexes, &table);
        append_indexed(&mut resolved, &addresses, &lookup.readonly_indexes, &table);
        tracing::debug!(
            table = %table,
            table_len = addresses.len(),
            appended = resolved.len() - before,
            "resolved lookup table"
        );
    }

    resolved
}

fn append_indexed(
    resolved: &mut ResolvedAccountList,
    addresses: &[Pubkey],
    indexes: &[u8],
    table: &str,
) {
    for &idx in indexes {
        match addresses.get(usize::from(idx)) {
            Some(address) => resolved.push(*address),
            None => tracing::warn!(
                table = %table,
                index = idx,
                table_len = addresses.len(),
                "lookup table index out of range"
            ),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::accounts::lookup_table::LOOKUP_TABLE_META_SIZE;

    fn key(seed: u8) -> Pubkey {
        Pubkey::new_from_array([seed; 32])
    }

    fn table_bytes(addresses: &[Pubkey]) -> Vec<u8> {
        let mut data = vec![0; LOOKUP_TABLE_META_SIZE];
        for addr in addresses {
            data.extend_from_slice(&addr.to_bytes());
        }
        data
    }

    fn lookup(table: Pubkey, writable: &[u8], readonly: &[u8]) -> LookupTableReference {
        LookupTableReference {
            table_address: table,
            writable_indexes: writable.to_vec(),
            readonly_indexes: readonly.to_vec(),
        }
    }

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    #[test]
    fn no_lookups_is_identity() {
        let statics = vec![key(1), key(2), key(3)];
        let fetcher = |_: &Pubkey| -> Result<Vec<u8>, Error> {
            Err(Error::TableFetch {
                table: "unused".into(),
                reason: "should not be called".into(),
            })
        };
        let resolved = resolve_account_list(&statics, &[], &fetcher);
        assert_eq!(resolved.as_slice(), statics.as_slice());
    }

    #[test]
    fn two_tables_keep_table_then_writable_then_readonly_order() {
        let table_a = key(100);
        let table_b = key(200);
        let a_contents = vec![key(10), key(11), key(12), key(13)];
        let b_contents = vec![key(20), key(21), key(22)];

        let mut tables = HashMap::new();
        tables.insert(table_a, table_bytes(&a_contents));
        tables.insert(table_b, table_bytes(&b_contents));

        let lookups = vec![
            lookup(table_a, &[3, 0], &[2]),
            lookup(table_b, &[1], &[2, 0]),
        ];
        let resolved = resolve_account_list(&[key(1)], &lookups, &tables);

        assert_eq!(
            resolved.as_slice(),
            &[key(1), key(13), key(10), key(12), key(21), key(22), key(20)]
        );
    }

    #[test]
    fn out_of_range_index_is_dropped_without_shifting() {
        let table = key(100);
        let mut tables = HashMap::new();
        tables.insert(table, table_bytes(&[key(10), key(11)]));

        let lookups = vec![lookup(table, &[0, 5, 1], &[9, 0])];
        let resolved = resolve_account_list(&[key(1)], &lookups, &tables);

        assert_eq!(resolved.as_slice(), &[key(1), key(10), key(11), key(10)]);
    }

    #[test]
    fn failed_fetch_and_short_table_are_skipped() {
        let missing = key(100);
        let short = key(101);
        let good = key(102);

        let mut tables = HashMap::new();
        tables.insert(short, vec![0; LOOKUP_TABLE_META_SIZE - 1]);
        tables.insert(good, table_bytes(&[key(30), key(31)]));

        let lookups = vec![
            lookup(missing, &[0], &[]),
            lookup(short, &[0], &[]),
            lookup(good, &[1], &[0]),
        ];
        let resolved = resolve_account_list(&[key(1)], &lookups, &tables);

        assert_eq!(resolved.as_slice(), &[key(1), key(31), key(30)]);
    }

    #[test]
    fn closure_fetcher_receives_table_addresses_in_order() {
        let seen = std::cell::RefCell::new(Vec::new());
        let fetcher = |address: &Pubkey| -> Result<Vec<u8>, Error> {
            seen.borrow_mut().push(*address);
            Ok(table_bytes(&[key(address.to_bytes()[0].wrapping_add(1))]))
        };

        let lookups = vec![lookup(key(5), &[0], &[]), lookup(key(7), &[], &[0])];
        let resolved = resolve_account_list(&[], &lookups, &fetcher);

        assert_eq!(*seen.borrow(), vec![key(5), key(7)]);
        assert_eq!(resolved.as_slice(), &[key(6), key(8)]);
    }

    #[test]
    fn random_index_lists_match_reference_concatenation() {
        let mut state = 0x5EED_u64;
        for _ in 0..200 {
            let table_count = (lcg_next(&mut state) % 3 + 1) as u8;
            let mut tables = HashMap::new();
            let mut lookups = Vec::new();
            let mut expected = vec![key(0)];

            for t in 0..table_count {
                let address = key(200 + t);
                let len = (lcg_next(&mut state) % 6) as u8;
                let contents: Vec<Pubkey> = (0..len).map(|i| key(t * 10 + i + 1)).collect();
                tables.insert(address, table_bytes(&contents));

                let pick = |state: &mut u64| -> Vec<u8> {
                    let n = lcg_next(state) % 5;
                    (0..n).map(|_| (lcg_next(state) % 8) as u8).collect()
                };
                let writable = pick(&mut state);
                let readonly = pick(&mut state);

                for idx in writable.iter().chain(readonly.iter()) {
                    if let Some(addr) = contents.get(usize::from(*idx)) {
                        expected.push(*addr);
                    }
                }
                lookups.push(lookup(address, &writable, &readonly));
            }

            let resolved = resolve_account_list(&[key(0)], &lookups, &tables);
            assert_eq!(resolved.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn prefetched_map_reports_missing_table() {
        let tables: HashMap<Pubkey, Vec<u8>> = HashMap::new();
        let err = tables.fetch_table(&key(1)).unwrap_err();
        assert!(matches!(err, Error::TableFetch { .. }));
    }
}
