
// imports
use crate::cognates::{self, CognateList};
use crate::config::{files_handling, Config, Params};
use crate::cooccurrence::{FrequencyTable, VectorSpaceBuilder};
use crate::corpus::{self, CorpusCleaner};
use crate::dictionary::BilingualDictionary;
use crate::error::{LexiconError, Result};
use crate::evaluation::{EvaluationReport, Evaluator};
use crate::projection::CrossLingualProjector;
use crate::similarity::Candidate;
use crate::testset::TestSet;
use crate::vectors::VectorSpace;

use std::collections::HashSet;
use std::env;
use std::time::Instant;
use log::{info, warn};
use rayon::ThreadPoolBuilder;


/// Everything built once at startup and read-only afterwards.
pub struct Resources {
    pub source_tokens: Vec<String>,
    pub target_tokens: Vec<String>,
    pub source_stopwords: HashSet<String>,
    pub target_stopwords: HashSet<String>,
    pub dictionary: BilingualDictionary,
    pub target_freq: FrequencyTable,
    pub source_space: VectorSpace,
    pub target_space: VectorSpace,
}

impl Resources {

    pub fn load(params: &Params) -> Result<Resources> {

        // small resources first, a missing one stops the run before the corpora are read
        let source_stopwords = corpus::load_stopwords(&params.source_stopwords)?;
        let target_stopwords = corpus::load_stopwords(&params.target_stopwords)?;
        let dictionary = BilingualDictionary::load(&params.dictionary)?;
        let builder = VectorSpaceBuilder::new(params.window_size)?;

        // both sides read through the token cache, they must not resolve to the same entry
        let source_cache = CorpusCleaner::cache_name(&params.source_corpus, params.source_lemma_index)?;
        let target_cache = CorpusCleaner::cache_name(&params.target_corpus, params.target_lemma_index)?;
        if source_cache == target_cache {
            return Err(LexiconError::Config(format!(
                "source and target corpora share the token cache {} ({})", source_cache, params.source_corpus)));
        }

        let cleaner = CorpusCleaner::new();
        let source_tokens = cleaner.token_list(&params.source_corpus, params.source_lemma_index, &params.cache_dir)?;
        let target_tokens = cleaner.token_list(&params.target_corpus, params.target_lemma_index, &params.cache_dir)?;

        info!("Building target word frequency dictionary ...");
        let target_freq = FrequencyTable::from_tokens(&target_tokens);

        let timer = Instant::now();
        info!("Building context vectors ...");
        let source_space = builder.build(&source_tokens, &source_stopwords);
        let target_space = builder.build(&target_tokens, &target_stopwords);
        info!("{} source and {} target context vectors, took {} seconds", source_space.len(), target_space.len(), timer.elapsed().as_secs());

        Ok(Self {
            source_tokens,
            target_tokens,
            source_stopwords,
            target_stopwords,
            dictionary,
            target_freq,
            source_space,
            target_space,
        })
    }

    pub fn projector(&self) -> CrossLingualProjector<'_> {
        CrossLingualProjector::new(&self.dictionary, &self.target_freq)
    }
}

pub struct Pipeline {}

impl Pipeline {

    // runs the main procedure of 3 steps -
    // -> configuration of arguments
    // -> loading of resources and context vectors
    // -> evaluation against the test set

    pub fn run() -> Result<EvaluationReport> {

        info!("entering program...");
        let args: Vec<String> = env::args().collect();

        info!("building parameters...");
        let params = Config::new(&args)?.get_params();
        info!("{}", params);

        Self::run_with(&params)
    }

    pub fn run_with(params: &Params) -> Result<EvaluationReport> {
        let pool = ThreadPoolBuilder::new().num_threads(params.num_threads).build()?;
        pool.install(|| Self::evaluate(params))
    }

    fn evaluate(params: &Params) -> Result<EvaluationReport> {

        let test_cases = TestSet::load(&params.test_set)?;
        let resources = Resources::load(params)?;

        if params.cognates {
            Self::report_cognates(params, &resources)?;
        }

        let timer = Instant::now();
        info!("starting evaluation of {} test cases...", test_cases.len());
        let projector = resources.projector();
        let evaluator = Evaluator::new(&resources.source_space, &resources.target_space, &projector, &resources.target_stopwords)
            .with_top_k(params.top_k);
        let report = evaluator.evaluate(&test_cases);

        for record in &report.records {
            info!("{} -> {} [{}] {}", record.source, record.gold, if record.hit { "OK" } else { "--" }, format_candidates(&record.candidates));
        }
        info!("{} hits out of {} evaluated cases ({} skipped), precision@{}: {:.4}, took {} seconds",
            report.hits, report.evaluated, report.skipped, report.top_k, report.precision_at_k(), timer.elapsed().as_secs());

        if let Some(output_dir) = &params.output_dir {
            files_handling::save_output(output_dir, "evaluation", &report)?;
            info!("saved report to {}/evaluation.json", output_dir);
        }

        Ok(report)
    }

    fn report_cognates(params: &Params, resources: &Resources) -> Result<CognateList> {

        info!("Processing cognates ...");
        let exceptions: HashSet<String> = match corpus::load_lines(&params.exceptions) {
            Ok(lines) => lines.into_iter().collect(),
            Err(LexiconError::MissingResource { path, .. }) => {
                warn!("{}: file not found ! ignoring exceptions ...", path.display());
                HashSet::new()
            },
            Err(e) => return Err(e),
        };

        let source = CorpusCleaner::remove_accents_all(&resources.source_tokens);
        let source_vocab = cognates::remove_hapax(&FrequencyTable::from_tokens(&source));
        let target_vocab = cognates::remove_hapax(&FrequencyTable::from_tokens(&resources.target_tokens));
        let pairs = cognates::cognate_pairs(&source_vocab, &target_vocab, &exceptions);

        if let Some(output_dir) = &params.output_dir {
            files_handling::save_output(output_dir, "cognates", &pairs)?;
        }
        Ok(pairs)
    }
}

pub fn format_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("({}, {:.4})", c.word, c.score))
        .collect::<Vec<String>>()
        .join(" ")
}


#[cfg(test)]
mod tests {

    use std::fs;
    use std::path::Path;
    use crate::config::Config;
    use super::Pipeline;

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    #[test]
    fn end_to_end_run() {

        let dir = tempfile::tempdir().unwrap();
        let source = write(dir.path(), "fr.lem",
            "le/DET/le chat/NOM/chat noir/ADJ/noir dort/VER/dormir ./SENT/. \
             le/DET/le chien/NOM/chien blanc/ADJ/blanc court/VER/courir ./SENT/. \
             le/DET/le chat/NOM/chat noir/ADJ/noir mange/VER/manger");
        let target = write(dir.path(), "en.lem",
            "the/the/DT black/black/JJ cat/cat/NN sleeps/sleep/VBZ ./././SENT \
             the/the/DT white/white/JJ dog/dog/NN runs/run/VBZ ./././SENT \
             the/the/DT black/black/JJ cat/cat/NN eats/eat/VBZ");
        let dictionary = write(dir.path(), "dic.txt",
            "noir;adj;;black;adj\nblanc;adj;;white;adj\ndormir;v;;sleep;v\ncourir;v;;run;v\nmanger;v;;eat;v\n");
        let fr_stop = write(dir.path(), "fr_stop.lst", "le\n");
        let en_stop = write(dir.path(), "en_stop.lst", "the\n");
        let ts = write(dir.path(), "ts.xml",
            "<ts>\
               <trad><s><l>fr</l><p>n</p><w>chat</w></s><t><l>en</l><p>n</p><w>cat</w></t></trad>\
               <trad><s><l>fr</l><p>n</p><w>loup</w></s><t><l>en</l><p>n</p><w>wolf</w></t></trad>\
               <trad><s><l>fr</l><p>n</p><w>chien</w></s><t><l>en</l><p>n</p><w>dog</w></t></trad>\
             </ts>");
        let output = dir.path().join("Output").display().to_string();
        let cache = dir.path().join("cache").display().to_string();

        let json = serde_json::json!({
            "source_corpus": source,
            "target_corpus": target,
            "dictionary": dictionary,
            "source_stopwords": fr_stop,
            "target_stopwords": en_stop,
            "test_set": ts,
            "cache_dir": cache,
            "output_dir": output,
            "window_size": 3,
            "top_k": 1,
            "num_threads": 2,
            "cognates": true,
            "exceptions": dir.path().join("missing.lst").display().to_string(),
        });
        let params = Config::from_json(&json).unwrap().get_params();

        let report = Pipeline::run_with(&params).unwrap();
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.hits, 2);
        assert!(dir.path().join("Output/evaluation.json").exists());
        assert!(dir.path().join("Output/cognates.json").exists());
        let cache_name = crate::corpus::CorpusCleaner::cache_name(&params.source_corpus, -1).unwrap();
        assert!(dir.path().join("cache").join(cache_name + ".lst.gz").exists());

        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("Output/evaluation.json")).unwrap()).unwrap();
        assert_eq!(saved["hits"], 2);
    }

    #[test]
    fn same_corpus_on_both_sides_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::json!({
            "source_corpus": "corpus.lem",
            "target_corpus": "corpus.lem",
            "source_lemma_index": -1,
            "target_lemma_index": -1,
            "source_stopwords": write(dir.path(), "fr.lst", "le\n"),
            "target_stopwords": write(dir.path(), "en.lst", "the\n"),
            "dictionary": write(dir.path(), "dic.txt", "chat;n;m;cat;n\n"),
            "test_set": write(dir.path(), "ts.xml", "<ts/>"),
        });
        let params = Config::from_json(&json).unwrap().get_params();
        assert!(matches!(Pipeline::run_with(&params), Err(crate::error::LexiconError::Config(_))));
    }

    #[test]
    fn missing_resource_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::json!({
            "source_corpus": "fr.lem",
            "target_corpus": "en.lem",
            "source_stopwords": dir.path().join("nope.lst").display().to_string(),
            "test_set": write(dir.path(), "ts.xml", "<ts/>"),
        });
        let params = Config::from_json(&json).unwrap().get_params();
        assert!(matches!(Pipeline::run_with(&params), Err(crate::error::LexiconError::MissingResource { .. })));
    }
}
