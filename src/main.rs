use std::process;
use lexicon_extractor::{init_logging, Pipeline};

fn main() {
    init_logging();

    // the report is logged (and saved) by the pipeline itself
    if let Err(e) = Pipeline::run() {
        log::error!("[ERROR] {}", e);
        process::exit(1);
    }
}
