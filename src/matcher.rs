// 🔎 BIN Matcher - first match wins prefix scan
//
// Linear scan in file order. A record matches when the query is a prefix
// of its `number`. No longest-prefix ranking: with overlapping prefixes the
// earliest record in the file is authoritative.
//
// The matcher does no normalization or validation; callers hand it
// digit strings that already passed `validation`.

use crate::record::BinRecord;

/// First record whose number starts with `query`, if any
pub fn find_one<'a>(records: &'a [BinRecord], query: &str) -> Option<&'a BinRecord> {
    records.iter().find(|record| record.matches_prefix(query))
}

/// Resolve each query in input order, dropping queries with no match
///
/// The output can be shorter than `queries`. Duplicates are resolved
/// independently, so a repeated query yields a repeated record.
pub fn find_many<'a, Q: AsRef<str>>(records: &'a [BinRecord], queries: &[Q]) -> Vec<&'a BinRecord> {
    queries
        .iter()
        .filter_map(|query| find_one(records, query.as_ref()))
        .collect()
}
