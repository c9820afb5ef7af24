use crate::error::{LexiconError, Result};

use serde_json::Value;
use std::{fs::File, fmt::Display, io::BufReader};

#[derive(Clone, Debug)]
pub struct Params {
    pub source_corpus: String,
    pub target_corpus: String,
    pub source_lemma_index: i64,
    pub target_lemma_index: i64,
    pub dictionary: String,
    pub source_stopwords: String,
    pub target_stopwords: String,
    pub test_set: String,
    pub cache_dir: String,
    pub output_dir: Option<String>,
    pub window_size: usize,
    pub top_k: usize,
    pub num_threads: usize,
    pub cognates: bool,
    pub exceptions: String,
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using params:
        source_corpus: {} (lemma field {})
        target_corpus: {} (lemma field {})
        dictionary: {}
        source_stopwords: {}
        target_stopwords: {}
        test_set: {}
        cache_dir: {}
        output_dir: {:?}
        window_size: {}
        top_k: {}
        num_threads: {}
        cognates: {} (exceptions: {})",
        self.source_corpus, self.source_lemma_index, self.target_corpus, self.target_lemma_index,
        self.dictionary, self.source_stopwords, self.target_stopwords, self.test_set, self.cache_dir,
        self.output_dir, self.window_size, self.top_k, self.num_threads, self.cognates, self.exceptions)
    }
}

pub struct Config {
    params: Params
}

fn invalid(key: &str, expected: &str) -> LexiconError {
    LexiconError::Config(format!("given {} is not {}", key, expected))
}

fn required_str(json: &Value, key: &str) -> Result<String> {
    match json.get(key) {
        Some(value) => value.as_str().map(|s| s.to_owned()).ok_or_else(|| invalid(key, "a string")),
        None => Err(LexiconError::Config(format!("{} was not supplied through json", key)))
    }
}

fn str_or(json: &Value, key: &str, default: &str) -> Result<String> {
    match json.get(key) {
        Some(_) => required_str(json, key),
        None => Ok(default.to_owned())
    }
}

fn i64_or(json: &Value, key: &str, default: i64) -> Result<i64> {
    match json.get(key) {
        Some(value) => value.as_i64().ok_or_else(|| invalid(key, "numeric")),
        None => Ok(default)
    }
}

fn usize_or(json: &Value, key: &str, default: usize) -> Result<usize> {
    match json.get(key) {
        Some(value) => value.as_u64().map(|v| v as usize).ok_or_else(|| invalid(key, "a non-negative number")),
        None => Ok(default)
    }
}

fn bool_or(json: &Value, key: &str, default: bool) -> Result<bool> {
    match json.get(key) {
        Some(value) => value.as_bool().ok_or_else(|| invalid(key, "boolean")),
        None => Ok(default)
    }
}

impl Config {

    pub fn get_params(&self) -> Params {
        self.params.clone()
    }

    pub fn new(args: &[String]) -> Result<Config> {

        if args.len() != 2 {
            return Err(LexiconError::Config("input should be a path to json file only".into()));
        }

        // parse input json
        let f = File::open(&args[1]).map_err(|e| LexiconError::missing(&args[1], e))?;
        let json: Value = serde_json::from_reader(BufReader::new(f))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config> {

        // corpora have no sensible default
        let source_corpus = required_str(json, "source_corpus")?;
        let target_corpus = required_str(json, "target_corpus")?;

        // handle default vs input parameters
        let params = Params {
            source_corpus,
            target_corpus,
            source_lemma_index: i64_or(json, "source_lemma_index", -1)?,
            target_lemma_index: i64_or(json, "target_lemma_index", -2)?,
            dictionary: str_or(json, "dictionary", "resources/dicfrenelda-utf8.txt")?,
            source_stopwords: str_or(json, "source_stopwords", "resources/french_stopwords.lst")?,
            target_stopwords: str_or(json, "target_stopwords", "resources/english_stopwords.lst")?,
            test_set: str_or(json, "test_set", "ts.xml")?,
            cache_dir: str_or(json, "cache_dir", "resources")?,
            output_dir: match json.get("output_dir") {
                Some(_) => Some(required_str(json, "output_dir")?),
                None => None
            },
            window_size: usize_or(json, "window_size", 7)?,
            top_k: usize_or(json, "top_k", 10)?,
            num_threads: usize_or(json, "num_threads", 4)?,
            cognates: bool_or(json, "cognates", false)?,
            exceptions: str_or(json, "exceptions", "resources/exceptions.lst")?,
        };

        if params.window_size == 0 || params.window_size % 2 == 0 {
            return Err(invalid("window_size", "a positive odd number"));
        }
        if params.top_k == 0 {
            return Err(invalid("top_k", "positive"));
        }

        Ok(
            Self {
                params
            }
        )
    }

}


pub mod files_handling {

    use crate::cognates::CognateList;
    use crate::error::Result;
    use crate::evaluation::EvaluationReport;

    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::Path;
    use flate2::{Compression, read::GzDecoder, write::GzEncoder};
    use serde::{Deserialize, Serialize};

    /// Lemma list of a corpus, cached between runs.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TokenList(pub Vec<String>);

    pub fn exists<R: ReadFile>(file_path: &str) -> bool {
        Path::new(&(file_path.to_string() + R::EXTENSION)).is_file()
    }

    pub fn read_input<R: ReadFile>(file_path: &str) -> Result<<R as ReadFile>::Item> {
        let input = <R as ReadFile>::read_file(file_path)?;
        Ok(input)
    }

    pub fn save_output<S: SaveFile + ?Sized>(output_dir: &str, file_name: &str, item: &S) -> Result<()> {

        // create output folder
        fs::create_dir_all(output_dir)?;

        item.save_file(output_dir, file_name)?;
        Ok(())
    }

    pub trait ReadFile {
        type Item;
        const EXTENSION: &'static str;
        fn read_file(file_path: &str) -> Result<Self::Item>;
    }

    impl ReadFile for TokenList {
        type Item = Self;
        const EXTENSION: &'static str = ".lst.gz";
        fn read_file(file_path: &str) -> Result<Self::Item> {
            let in_file = file_path.to_string() + Self::EXTENSION;
            let f = BufReader::new(File::open(in_file)?);
            let reader = GzDecoder::new(f);
            let item = bincode::deserialize_from(reader)?;
            Ok(item)
        }
    }

    pub trait SaveFile {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()>;
    }

    impl SaveFile for TokenList {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + Self::EXTENSION;
            let f = BufWriter::new(File::create(out)?);
            let mut writer = GzEncoder::new(f, Compression::default());
            bincode::serialize_into(&mut writer, self)?;
            writer.finish()?.flush()?;
            Ok(())
        }
    }

    impl SaveFile for EvaluationReport {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + ".json";
            let f = BufWriter::new(File::create(out)?);
            serde_json::to_writer_pretty(f, self)?;
            Ok(())
        }
    }

    impl SaveFile for CognateList {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + ".json";
            let f = BufWriter::new(File::create(out)?);
            serde_json::to_writer(f, self)?;
            Ok(())
        }
    }
}
