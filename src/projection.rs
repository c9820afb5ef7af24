use crate::cooccurrence::FrequencyTable;
use crate::dictionary::BilingualDictionary;
use crate::vectors::{ContextVector, ProjectedVector};

use std::collections::HashSet;
use log::trace;


/// Carries source context vectors over to the target vocabulary. Each context
/// word spreads its weight over its translations, proportionally to how often
/// each translation occurs in the target corpus.
pub struct CrossLingualProjector<'a> {
    dictionary: &'a BilingualDictionary,
    target_freq: &'a FrequencyTable,
}

impl<'a> CrossLingualProjector<'a> {

    pub fn new(dictionary: &'a BilingualDictionary, target_freq: &'a FrequencyTable) -> CrossLingualProjector<'a> {
        Self { dictionary, target_freq }
    }

    pub fn project(&self, vector: &ContextVector, stopwords: &HashSet<String>) -> ProjectedVector {

        let mut translated = ProjectedVector::new();

        for (word, weight) in vector.iter() {
            let weight = weight as f64;

            let translations = match self.dictionary.translations(word) {
                Some(translations) if !stopwords.contains(word) => translations,
                _ => {
                    translated.add_unknown(weight);
                    continue;
                }
            };

            // only translations seen in the target corpus take part
            let known: Vec<(&str, f64)> = translations
                .iter()
                .filter_map(|t| self.target_freq.get(t).map(|f| (t.as_str(), f as f64)))
                .collect();
            let freq_sum: f64 = known.iter().map(|(_, f)| f).sum();

            // none of the translations occur in the target corpus: the weight is dropped,
            // it does not go to <unk> either
            if freq_sum == 0.0 {
                trace!("dropping {} units of '{}', no translation in target corpus", weight, word);
                continue;
            }

            for (target, freq) in known {
                translated.add(target, weight * freq / freq_sum);
            }
        }

        translated
    }
}
