
// imports
use crate::error::{LexiconError, Result};
use crate::vectors::{VectorSpace, UNK};

use std::collections::{HashMap, HashSet};
use log::debug;


/// Number of occurrences of every token of a corpus.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    token2count: HashMap<String, usize>,
}

impl FrequencyTable {

    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> FrequencyTable {

        // accumulate occurrences of words - how many times each token appears in the corpus
        let mut token2count: HashMap<String, usize> = HashMap::new();
        for tok in tokens {
            match token2count.get_mut(tok.as_ref()) {
                Some(val) => *val += 1,
                None => { token2count.insert(tok.as_ref().to_owned(), 1); }
            }
        }

        Self { token2count }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.token2count.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token2count.contains_key(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.token2count.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.token2count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token2count.is_empty()
    }

    /// Number of counted tokens, equal to the length of the corpus.
    pub fn total(&self) -> usize {
        self.token2count.values().sum()
    }
}


/// Builds the context vectors of a corpus with a symmetric sliding window.
pub struct VectorSpaceBuilder {
    window: usize,
}

impl VectorSpaceBuilder {

    pub fn new(window: usize) -> Result<VectorSpaceBuilder> {
        if window == 0 || window % 2 == 0 {
            return Err(LexiconError::Config(format!("window size should be a positive odd number, got {}", window)));
        }
        Ok(Self { window })
    }

    pub fn center(&self) -> usize {
        self.window / 2
    }

    fn is_sentinel_or_stopword(token: &str, stopwords: &HashSet<String>) -> bool {
        token == UNK || stopwords.contains(token)
    }

    pub fn build<S: AsRef<str>>(&self, tokens: &[S], stopwords: &HashSet<String>) -> VectorSpace {

        // every token occupies the center slot once. Positions outside of the corpus hold
        // the <unk> sentinel, so the window simply stops at both ends of the sequence and
        // the first and last tokens get fewer context terms.
        let center = self.center();
        let n = tokens.len();
        let mut space = VectorSpace::default();

        for i in 0..n {

            let tok = tokens[i].as_ref();
            if Self::is_sentinel_or_stopword(tok, stopwords) {
                continue;
            }

            let vector = space.entry(tok);
            let start = i.saturating_sub(center);
            let end = usize::min(n, i + center + 1);

            for j in start..end {
                if j == i { continue }

                let context = tokens[j].as_ref();
                if !Self::is_sentinel_or_stopword(context, stopwords) {
                    vector.increment(context);
                }
            }
        }

        debug!("built {} context vectors from {} tokens with window {}", space.len(), n, self.window);
        space
    }
}


#[cfg(test)]
mod tests {

    use std::collections::HashSet;
    use super::{FrequencyTable, VectorSpaceBuilder};

    fn tokenize(sequence: &str) -> Vec<String> {
        sequence.split(' ').map(|x| x.to_string()).collect()
    }

    fn stopwords(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn frequencies_sum_to_corpus_length() {
        let tokens = tokenize("le chat noir mange le poisson et le chat dort");
        let freq = FrequencyTable::from_tokens(&tokens);
        assert_eq!(freq.total(), tokens.len());
        assert_eq!(freq.get("le"), Some(3));
        assert_eq!(freq.get("chat"), Some(2));
        assert_eq!(freq.get("chien"), None);
        assert_eq!(freq.len(), 7);

        let empty: Vec<String> = Vec::new();
        assert_eq!(FrequencyTable::from_tokens(&empty).total(), 0);
    }

    #[test]
    fn rejects_even_or_empty_window() {
        assert!(VectorSpaceBuilder::new(0).is_err());
        assert!(VectorSpaceBuilder::new(4).is_err());
        assert_eq!(VectorSpaceBuilder::new(7).unwrap().center(), 3);
    }

    #[test]
    fn cooc_test() {

        // golden counts computed by hand, window of 3 (one word on each side)
        let tokens = tokenize("a b a c le a");
        let builder = VectorSpaceBuilder::new(3).unwrap();
        let space = builder.build(&tokens, &stopwords(&["le"]));

        assert_eq!(space.len(), 3);
        let a = space.get("a").unwrap();
        assert_eq!(a.count("b"), 2);
        assert_eq!(a.count("c"), 1);
        assert_eq!(a.count("a"), 0);
        assert_eq!(a.total(), 3);

        let b = space.get("b").unwrap();
        assert_eq!(b.count("a"), 2);

        let c = space.get("c").unwrap();
        assert_eq!(c.count("a"), 1);
        assert_eq!(c.total(), 1);

        // stopwords are neither centers nor context
        assert!(space.get("le").is_none());
    }

    #[test]
    fn interior_window_is_symmetric() {
        let tokens = tokenize("w0 w1 w2 w3 w4 w5 w6 w7 w8 w9");
        let builder = VectorSpaceBuilder::new(7).unwrap();
        let space = builder.build(&tokens, &stopwords(&["w2"]));

        // center = 3, index 5 has w2..w8 in its window
        let keys: HashSet<&str> = space.get("w5").unwrap().iter().map(|(k, _)| k).collect();
        let expected: HashSet<&str> = ["w3", "w4", "w6", "w7", "w8"].into_iter().collect();
        assert_eq!(keys, expected);

        // the first token only sees its right context
        let keys: HashSet<&str> = space.get("w0").unwrap().iter().map(|(k, _)| k).collect();
        let expected: HashSet<&str> = ["w1", "w3"].into_iter().collect();
        assert_eq!(keys, expected);

        // and the last one only its left context
        let keys: HashSet<&str> = space.get("w9").unwrap().iter().map(|(k, _)| k).collect();
        let expected: HashSet<&str> = ["w6", "w7", "w8"].into_iter().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn window_of_one_keeps_centers_without_context() {
        let tokens = tokenize("a b");
        let space = VectorSpaceBuilder::new(1).unwrap().build(&tokens, &HashSet::new());
        assert_eq!(space.len(), 2);
        assert_eq!(space.get("a").unwrap().total(), 0);
    }

    #[test]
    fn sentinel_tokens_are_ignored() {
        let tokens = tokenize("a <unk> b");
        let space = VectorSpaceBuilder::new(3).unwrap().build(&tokens, &HashSet::new());
        assert!(!space.contains("<unk>"));
        assert_eq!(space.get("a").unwrap().total(), 0);
        assert_eq!(space.get("b").unwrap().total(), 0);
    }
}
