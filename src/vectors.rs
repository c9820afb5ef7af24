use std::collections::HashMap;
use std::iter;
use rayon::prelude::*;

/// Sentinel used to pad the co-occurrence window and to collect
/// the mass of untranslatable context words after projection.
pub const UNK: &str = "<unk>";

/// Read access shared by every sparse vector that can be compared with cosine.
pub trait SparseVector {
    fn weight(&self, key: &str) -> f64;
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn norm(&self) -> f64 {
        self.entries().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// Co-occurrence counts of the words seen around one center word.
/// Every stored count is at least 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextVector {
    counts: HashMap<String, usize>,
}

impl ContextVector {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, context: &str) {
        match self.counts.get_mut(context) {
            Some(val) => *val += 1,
            None => { self.counts.insert(context.to_owned(), 1); }
        }
    }

    pub fn count(&self, context: &str) -> usize {
        self.counts.get(context).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ContextVector {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let counts = iter
            .into_iter()
            .filter(|(_, c)| *c > 0)
            .map(|(k, c)| (k.into(), c))
            .collect();
        Self { counts }
    }
}

impl SparseVector for ContextVector {
    fn weight(&self, key: &str) -> f64 {
        self.count(key) as f64
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k, v as f64)))
    }

    fn len(&self) -> usize {
        self.counts.len()
    }
}

/// All context vectors of one corpus, keyed by center word.
#[derive(Clone, Debug, Default)]
pub struct VectorSpace {
    vectors: HashMap<String, ContextVector>,
}

impl VectorSpace {

    pub(crate) fn entry(&mut self, center: &str) -> &mut ContextVector {
        self.vectors.entry(center.to_owned()).or_default()
    }

    pub fn get(&self, center: &str) -> Option<&ContextVector> {
        self.vectors.get(center)
    }

    pub fn contains(&self, center: &str) -> bool {
        self.vectors.contains_key(center)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextVector)> + '_ {
        self.vectors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl<'a> rayon::iter::IntoParallelIterator for &'a VectorSpace {
    type Iter = rayon::collections::hash_map::Iter<'a, String, ContextVector>;
    type Item = (&'a String, &'a ContextVector);

    fn into_par_iter(self) -> Self::Iter {
        self.vectors.par_iter()
    }
}

/// A source context vector expressed over the target vocabulary.
/// `unknown` holds the `<unk>` bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedVector {
    weights: HashMap<String, f64>,
    unknown: f64,
}

impl ProjectedVector {

    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, target: &str, mass: f64) {
        *self.weights.entry(target.to_owned()).or_insert(0.0) += mass;
    }

    pub(crate) fn add_unknown(&mut self, mass: f64) {
        self.unknown += mass;
    }

    pub fn unknown(&self) -> f64 {
        self.unknown
    }

    pub fn get(&self, target: &str) -> Option<f64> {
        if target == UNK {
            return Some(self.unknown);
        }
        self.weights.get(target).copied()
    }

    /// Sum of all weights, `<unk>` included.
    pub fn mass(&self) -> f64 {
        self.weights.values().sum::<f64>() + self.unknown
    }
}

impl SparseVector for ProjectedVector {
    fn weight(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, f64)> + '_> {
        Box::new(
            self.weights
                .iter()
                .map(|(k, v)| (k.as_str(), *v))
                .chain(iter::once((UNK, self.unknown))),
        )
    }

    // the <unk> key is always present
    fn len(&self) -> usize {
        self.weights.len() + 1
    }
}
