use crate::error::{LexiconError, Result};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use indexmap::{IndexMap, IndexSet};
use log::{info, warn};

/// Field positions of the source and target token in a `;` separated dictionary line.
const SOURCE_FIELD: usize = 0;
const TARGET_FIELD: usize = 3;

/// Source word to its distinct translations, both in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct BilingualDictionary {
    entries: IndexMap<String, IndexSet<String>>,
}

impl BilingualDictionary {

    pub fn load<P: AsRef<Path>>(path: P) -> Result<BilingualDictionary> {
        let path = path.as_ref();
        info!("Loading dictionary [{}] ...", path.display());
        let f = File::open(path).map_err(|e| LexiconError::missing(path, e))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<BilingualDictionary> {

        let mut dictionary = Self::default();
        let mut malformed = 0usize;

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() { continue }

            let fields: Vec<&str> = line.split(';').collect();
            match (fields.get(SOURCE_FIELD), fields.get(TARGET_FIELD)) {
                (Some(source), Some(target)) => dictionary.insert(source, target),
                _ => malformed += 1,
            }
        }

        if malformed > 0 {
            warn!("ignored {} dictionary lines with less than {} fields", malformed, TARGET_FIELD + 1);
        }
        info!("dictionary holds {} source entries", dictionary.len());
        Ok(dictionary)
    }

    pub fn insert(&mut self, source: &str, target: &str) {
        match self.entries.get_mut(source) {
            Some(targets) => { targets.insert(target.to_owned()); },
            None => {
                let mut targets = IndexSet::new();
                targets.insert(target.to_owned());
                self.entries.insert(source.to_owned(), targets);
            }
        }
    }

    pub fn translations(&self, source: &str) -> Option<&IndexSet<String>> {
        self.entries.get(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for BilingualDictionary {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut dictionary = Self::default();
        for (source, target) in iter {
            dictionary.insert(source, target);
        }
        dictionary
    }
}
