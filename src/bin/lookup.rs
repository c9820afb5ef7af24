
use std::{env, process};
use log::{error, info};
use rayon::ThreadPoolBuilder;
use lexicon_extractor::{corpus, init_logging, Config, Evaluator, Resources, Result};


// this executable prints the best translation candidates of arbitrary source words,
// using the same resources as the evaluation run.
// treated as binary executable so it can be ran independantly from main

fn main() {

    init_logging();

    // arguments to this executable should be:
    // path to the json parameters (as for the main executable)
    // path to a file holding one source word per line
    // example: ... params.json Input/words.txt
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        error!("expected a path to the json parameters followed by a path to a word list");
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        error!("[ERROR] {}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {

    let params = Config::new(&args[..2])?.get_params();
    let words = corpus::load_lines(&args[2])?;

    let pool = ThreadPoolBuilder::new().num_threads(params.num_threads).build()?;
    pool.install(|| {

        let resources = Resources::load(&params)?;
        let projector = resources.projector();
        let evaluator = Evaluator::new(&resources.source_space, &resources.target_space, &projector, &resources.target_stopwords)
            .with_top_k(params.top_k);

        for word in words.iter().map(|w| w.trim()).filter(|w| !w.is_empty()) {
            match evaluator.candidates(word) {
                Some(candidates) => {
                    info!("searching {} best translations of {}", params.top_k, word);
                    for (i, c) in candidates.iter().enumerate() {
                        info!("{} : {} ? {} = {:.4}", i, word, c.word, c.score);
                    }
                },
                None => info!("{} has no context vector in the source corpus", word),
            }
        }
        Ok(())
    })
}
