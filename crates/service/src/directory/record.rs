use serde_json::{Map, Value};

use crate::pagination::parse_int_prefix;

/// A directory entry. `id`, `name` and `emails` are the usual fields; any
/// other key sent by a client is kept as-is.
pub type Record = Map<String, Value>;

pub const ID_FIELD: &str = "id";

/// Integer id of a record, if it has one.
pub fn record_id(record: &Record) -> Option<i64> {
    record.get(ID_FIELD).and_then(Value::as_i64)
}

/// `max(id) + 1` over records carrying an integer id, or 1.
pub fn next_id(records: &[Record]) -> i64 {
    records
        .iter()
        .filter_map(record_id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Parse a path segment into an id. `None` never matches a stored record.
pub fn parse_id(raw: &str) -> Option<i64> {
    parse_int_prefix(raw)
}

/// `{id} ∪ body`, the given id taking precedence over any id in `body`.
pub fn with_id(id: i64, body: Record) -> Record {
    let mut out = Record::with_capacity(body.len() + 1);
    out.insert(ID_FIELD.to_string(), Value::from(id));
    for (k, v) in body {
        if k != ID_FIELD {
            out.insert(k, v);
        }
    }
    out
}

/// Shallow merge: every key of `patch` overwrites the same key in `base`.
pub fn merge(mut base: Record, patch: Record) -> Record {
    for (k, v) in patch {
        base.insert(k, v);
    }
    base
}
