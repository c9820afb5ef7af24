
// imports
use crate::config::files_handling::{self, TokenList};
use crate::error::{LexiconError, Result};

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use flate2::Crc;
use log::{debug, info};
use regex::Regex;

const INVALID_CHARS: &str = r"[^A-Za-z\-_']";

/// Turns POS tagged corpora (`word/tag/lemma` tokens) into lowercased lemma lists.
pub struct CorpusCleaner {
    invalid: Regex,
}

impl CorpusCleaner {

    pub fn new() -> CorpusCleaner {
        // constant pattern, always compiles
        let invalid = Regex::new(INVALID_CHARS).expect("invalid character pattern");
        Self { invalid }
    }

    /// Cache name of a corpus: file stem, lemma field and a checksum of the absolute path,
    /// so corpora sharing a file name never share a cache entry.
    pub fn cache_name(corpus: &str, lemma_index: i64) -> Result<String> {

        let stem = Path::new(corpus)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LexiconError::Config(format!("cannot derive a cache name from {}", corpus)))?;

        let absolute = std::path::absolute(corpus).unwrap_or_else(|_| PathBuf::from(corpus));
        let mut crc = Crc::new();
        crc.update(absolute.to_string_lossy().as_bytes());

        Ok(format!("{}.{}.{:08x}", stem, lemma_index, crc.sum()))
    }

    /// Lemma list of `corpus`, read from `<cache_dir>/<cache name>.lst.gz` when it was built before.
    pub fn token_list(&self, corpus: &str, lemma_index: i64, cache_dir: &str) -> Result<Vec<String>> {

        let name = Self::cache_name(corpus, lemma_index)?;
        let stem = name.as_str();
        let cache = PathBuf::from(cache_dir).join(stem).display().to_string();

        if files_handling::exists::<TokenList>(&cache) {
            info!("Loading token list [{}] from cache ...", stem);
            let tokens = files_handling::read_input::<TokenList>(&cache)?;
            return Ok(tokens.0);
        }

        let timer = Instant::now();
        info!("Building word list [{}] ...", stem);
        let text = fs::read_to_string(corpus).map_err(|e| LexiconError::missing(corpus, e))?;
        let tokens = self.clean(&text, lemma_index);
        info!("size: {}, took {} seconds", tokens.len(), timer.elapsed().as_secs());

        let tokens = TokenList(tokens);
        files_handling::save_output(cache_dir, stem, &tokens)?;
        Ok(tokens.0)
    }

    pub fn clean(&self, text: &str, lemma_index: i64) -> Vec<String> {

        let mut result = Vec::new();
        let mut malformed = 0usize;

        for raw in text.split_whitespace() {

            let fields: Vec<&str> = raw.split('/').collect();
            let lemma = match Self::resolve_index(fields.len(), lemma_index) {
                Some(i) => fields[i],
                None => {
                    malformed += 1;
                    continue;
                }
            };

            let word = lemma.split(':').next().unwrap_or("").to_lowercase();
            if self.is_valid_word(&Self::remove_accents(&word)) {
                result.push(word);
            }
        }

        if malformed > 0 {
            debug!("{} tokens had no field at index {}", malformed, lemma_index);
        }
        result
    }

    // negative indices count from the end of the token fields
    fn resolve_index(len: usize, index: i64) -> Option<usize> {
        let resolved = if index < 0 { len as i64 + index } else { index };
        if resolved >= 0 && (resolved as usize) < len {
            Some(resolved as usize)
        } else {
            None
        }
    }

    /// A word is kept when it only holds letters, `-`, `_` or `'` and no `__`.
    pub fn is_valid_word(&self, word: &str) -> bool {
        !word.is_empty() && !self.invalid.is_match(word) && !word.contains("__")
    }

    pub fn remove_accents(word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            match c {
                'é' | 'è' | 'ê' | 'ë' => out.push('e'),
                'ï' | 'î' => out.push('i'),
                'à' | 'â' => out.push('a'),
                'ô' => out.push('o'),
                'ç' => out.push('c'),
                'û' => out.push('u'),
                'œ' => out.push_str("oe"),
                c => out.push(c),
            }
        }
        out
    }

    pub fn remove_accents_all(words: &[String]) -> Vec<String> {
        words.iter().map(|w| Self::remove_accents(w)).collect()
    }
}

impl Default for CorpusCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry per line, as used by stopword and exception lists.
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    info!("Loading data file [{}] ...", path.display());
    let f = File::open(path).map_err(|e| LexiconError::missing(path, e))?;
    let lines = BufReader::new(f).lines().collect::<std::io::Result<Vec<String>>>()?;
    Ok(lines)
}

pub fn load_stopwords<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    Ok(load_lines(path)?.into_iter().collect())
}


#[cfg(test)]
mod tests {

    use std::io::Write;
    use super::{load_stopwords, CorpusCleaner};

    #[test]
    fn strips_accents() {
        assert_eq!(CorpusCleaner::remove_accents("élève"), "eleve");
        assert_eq!(CorpusCleaner::remove_accents("cœur"), "coeur");
        assert_eq!(CorpusCleaner::remove_accents("garçon"), "garcon");
        assert_eq!(CorpusCleaner::remove_accents("île"), "ile");
        assert_eq!(CorpusCleaner::remove_accents("plain"), "plain");
    }

    #[test]
    fn validates_words() {
        let cleaner = CorpusCleaner::new();
        assert!(cleaner.is_valid_word("aujourd'hui"));
        assert!(cleaner.is_valid_word("peut-etre"));
        assert!(!cleaner.is_valid_word(""));
        assert!(!cleaner.is_valid_word("a__b"));
        assert!(!cleaner.is_valid_word("1984"));
        assert!(!cleaner.is_valid_word("fin."));
        assert!(!cleaner.is_valid_word("élève"));
    }

    #[test]
    fn keeps_lemmas_at_requested_field() {
        let cleaner = CorpusCleaner::new();

        // french corpora carry the lemma last
        let fr = "Les/DET:ART/le chats/NOM/chat noirs/ADJ/noir ./SENT/. élèves/NOM/élève 12/NUM/12";
        assert_eq!(cleaner.clean(fr, -1), vec!["le", "chat", "noir", "élève"]);

        // english ones before the tag
        let en = "The/the/DT cats/cat:n/NNS sleep/sleep/VBP\nX__Y/x__y/NN";
        assert_eq!(cleaner.clean(en, -2), vec!["the", "cat", "sleep"]);
        assert_eq!(cleaner.clean(en, 0), vec!["the", "cats", "sleep"]);

        // indices out of range drop the token
        assert!(cleaner.clean("a/b", -3).is_empty());
        assert!(cleaner.clean("a/b", 2).is_empty());
    }

    #[test]
    fn token_list_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.lem");
        std::fs::write(&corpus, "Le/DET/le chat/NOM/chat").unwrap();
        let cache_dir = dir.path().join("resources");
        let cache_dir = cache_dir.to_str().unwrap();

        let cleaner = CorpusCleaner::new();
        let first = cleaner.token_list(corpus.to_str().unwrap(), -1, cache_dir).unwrap();
        assert_eq!(first, vec!["le", "chat"]);
        let name = CorpusCleaner::cache_name(corpus.to_str().unwrap(), -1).unwrap();
        assert!(dir.path().join("resources").join(name + ".lst.gz").exists());

        // the cache wins over the corpus once written
        std::fs::remove_file(&corpus).unwrap();
        let second = cleaner.token_list(corpus.to_str().unwrap(), -1, cache_dir).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn same_file_name_in_other_directory_gets_its_own_cache() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fr")).unwrap();
        std::fs::create_dir_all(dir.path().join("en")).unwrap();
        let fr = dir.path().join("fr/corpus.lem");
        let en = dir.path().join("en/corpus.lem");
        std::fs::write(&fr, "Le/DET/le chat/NOM/chat").unwrap();
        std::fs::write(&en, "The/the/DT cat/cat/NN").unwrap();
        let cache_dir = dir.path().join("resources");
        let cache_dir = cache_dir.to_str().unwrap();

        let cleaner = CorpusCleaner::new();
        let source = cleaner.token_list(fr.to_str().unwrap(), -1, cache_dir).unwrap();
        let target = cleaner.token_list(en.to_str().unwrap(), -2, cache_dir).unwrap();
        assert_eq!(source, vec!["le", "chat"]);
        assert_eq!(target, vec!["the", "cat"]);
    }

    #[test]
    fn lemma_field_is_part_of_the_cache_name() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("en.lem");
        std::fs::write(&corpus, "The/the/DT cats/cat/NNS").unwrap();
        let cache_dir = dir.path().join("resources");
        let cache_dir = cache_dir.to_str().unwrap();
        let corpus = corpus.to_str().unwrap();

        let cleaner = CorpusCleaner::new();
        assert_eq!(cleaner.token_list(corpus, -2, cache_dir).unwrap(), vec!["the", "cat"]);
        assert_eq!(cleaner.token_list(corpus, 0, cache_dir).unwrap(), vec!["the", "cats"]);
        assert_ne!(CorpusCleaner::cache_name(corpus, -2).unwrap(), CorpusCleaner::cache_name(corpus, 0).unwrap());
    }

    #[test]
    fn loads_stopwords() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "le\nla\r\nles\n").unwrap();
        let stop = load_stopwords(f.path()).unwrap();
        assert_eq!(stop.len(), 3);
        assert!(stop.contains("la"));
        assert!(load_stopwords("missing.lst").is_err());
    }
}
