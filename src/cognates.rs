use crate::cooccurrence::FrequencyTable;

use std::collections::{HashMap, HashSet};
use log::{debug, info};
use serde::Serialize;

const PREFIX: usize = 5;
const EXCEPTION_PREFIX: usize = 7;

/// Source and target words that look alike.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CognateList(pub Vec<(String, String)>);

fn prefix(word: &str, n: usize) -> &str {
    match word.char_indices().nth(n) {
        Some((i, _)) => &word[..i],
        None => word,
    }
}

/// Words seen more than once, sorted.
pub fn remove_hapax(freq: &FrequencyTable) -> Vec<String> {
    let mut words: Vec<String> = freq
        .iter()
        .filter(|(_, count)| *count > 1)
        .map(|(word, _)| word.to_owned())
        .collect();
    words.sort();
    info!("{} of {} words occur more than once", words.len(), freq.len());
    words
}

/// Pairs sharing their first five characters. Prefixes listed in `exceptions`
/// are too common to mean anything and need seven shared characters.
pub fn cognate_pairs(source: &[String], target: &[String], exceptions: &HashSet<String>) -> CognateList {

    let mut by_prefix: HashMap<&str, Vec<&str>> = HashMap::new();
    for word in target {
        by_prefix.entry(prefix(word, PREFIX)).or_default().push(word);
    }

    let mut pairs = Vec::new();
    for word in source {
        let short = prefix(word, PREFIX);
        let candidates = match by_prefix.get(short) {
            Some(candidates) => candidates,
            None => continue,
        };
        for candidate in candidates {
            if exceptions.contains(short) && prefix(word, EXCEPTION_PREFIX) != prefix(candidate, EXCEPTION_PREFIX) {
                continue;
            }
            debug!("cognates: {} ~ {}", word, candidate);
            pairs.push((word.clone(), candidate.to_string()));
        }
    }

    info!("size: {}", pairs.len());
    CognateList(pairs)
}
