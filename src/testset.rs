use crate::error::{LexiconError, Result};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use log::{info, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

// element depths, the document root is at depth 1
const CASE_DEPTH: usize = 2;
const SIDE_DEPTH: usize = 3;
const FIELD_DEPTH: usize = 4;
// within a side, the word sits in the third field
const WORD_FIELD: usize = 2;


/// A source word and its expected translation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub source: String,
    pub gold: String,
}

impl TestCase {
    pub fn new(source: &str, gold: &str) -> TestCase {
        Self { source: source.to_owned(), gold: gold.to_owned() }
    }
}

#[derive(Default)]
struct CaseState {
    side: usize,
    field: usize,
    words: [String; 2],
}

impl CaseState {

    fn open(&mut self, depth: usize) {
        match depth {
            CASE_DEPTH => *self = CaseState::default(),
            SIDE_DEPTH => self.field = 0,
            _ => {}
        }
    }

    /// Returns the words of a case when its element closes.
    fn close(&mut self, depth: usize) -> Option<[String; 2]> {
        match depth {
            CASE_DEPTH => return Some(std::mem::take(&mut self.words)),
            SIDE_DEPTH => self.side += 1,
            FIELD_DEPTH => self.field += 1,
            _ => {}
        }
        None
    }

    fn text(&mut self, depth: usize, text: &str) {
        if depth == FIELD_DEPTH && self.side < 2 && self.field == WORD_FIELD {
            self.words[self.side].push_str(text);
        }
    }
}

pub struct TestSet {}

impl TestSet {

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<TestCase>> {
        let path = path.as_ref();
        info!("Loading test set [{}] ...", path.display());
        let f = File::open(path).map_err(|e| LexiconError::missing(path, e))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reads cases from an XML document where every child of the root is one case.
    /// The source word is the text of the third child of the first side element,
    /// the gold translation the text of the third child of the second one.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Vec<TestCase>> {

        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut cases = Vec::new();
        let mut incomplete = 0usize;
        let mut state = CaseState::default();
        let mut depth = 0usize;
        let mut buf = Vec::new();

        loop {
            let finished = match reader.read_event_into(&mut buf)? {
                Event::Start(_) => {
                    depth += 1;
                    state.open(depth);
                    None
                },
                Event::Empty(_) => {
                    state.open(depth + 1);
                    state.close(depth + 1)
                },
                Event::End(_) => {
                    let finished = state.close(depth);
                    depth = depth.saturating_sub(1);
                    finished
                },
                Event::Text(t) => {
                    let text = t.unescape().map_err(quick_xml::Error::from)?;
                    state.text(depth, text.trim());
                    None
                },
                Event::CData(t) => {
                    state.text(depth, String::from_utf8_lossy(&t).trim());
                    None
                },
                Event::Eof => break,
                _ => None,
            };

            if let Some([source, gold]) = finished {
                if source.is_empty() || gold.is_empty() {
                    incomplete += 1;
                } else {
                    cases.push(TestCase { source, gold });
                }
            }
            buf.clear();
        }

        if incomplete > 0 {
            warn!("ignored {} test cases without source or gold word", incomplete);
        }
        info!("loaded {} test cases", cases.len());
        Ok(cases)
    }
}
