use crate::error::SequenceError;
use maskprime_core::TrialItem;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads one trial pool from a JSON array of row records. Rows are read-only
/// after this; a missing field fails the whole load, since dropping a row
/// would desynchronize block sizes downstream.
pub fn load_pool<R: Read>(reader: R) -> Result<Vec<TrialItem>, SequenceError> {
    let items: Vec<TrialItem> = serde_json::from_reader(reader)?;
    Ok(items)
}

pub fn load_pool_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TrialItem>, SequenceError> {
    let file = File::open(path)?;
    load_pool(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_rows_with_all_fields() {
        let json = r#"[
            {"Sentence": "cat", "Probe": "cat", "Match": "match", "Condition": "related"},
            {"Sentence": "dog", "Probe": "fog", "Match": "mismatch", "Condition": "unrelated"}
        ]"#;
        let pool = load_pool(json.as_bytes()).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].sentence, "cat");
        assert!(pool[0].is_same());
        assert!(!pool[1].is_same());
        assert_eq!(pool[1].condition, "unrelated");
    }

    #[test]
    fn missing_field_fails_the_whole_load() {
        let json = r#"[{"Sentence": "cat", "Probe": "cat", "Match": "match"}]"#;
        let result = load_pool(json.as_bytes());
        assert!(matches!(result, Err(SequenceError::Pool(_))));
    }

    #[test]
    fn empty_pool_is_not_an_error() {
        let pool = load_pool("[]".as_bytes()).unwrap();
        assert!(pool.is_empty());
    }
}
