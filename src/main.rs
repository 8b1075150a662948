use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{value_parser, Arg, Command};
use topk_recall::data_handling::results::ResultMatrix;
use topk_recall::util::ground_truth::GroundTruth;
use topk_recall::util::recall::{format_recall, recall_report};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("evaluate")
        .version("0.1.0")
        .about("Computes Recall@R of ranked search results against ground truth")
        .long_about(
            "Computes Recall@R of ranked search results against ground truth.\n\n\
             Recall@R is the fraction of queries whose true nearest neighbor (the first \
             id of its groundtruth line) appears among the first R results. A query \
             counts at most once, even if the true neighbor is listed several times in \
             its first R results. R runs over 1, 2, 5, 10, 20, 50, 100, 200, 500, 1000, \
             stopping at the number of results per query.",
        )
        .arg(
            Arg::new("score")
                .value_name("SCORE")
                .help("Search results file (two header lines, then `id:score,...,` per query)")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("groundtruth")
                .value_name("GROUNDTRUTH")
                .help("Ground truth file in the same format")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .get_matches();

    let score_path = matches
        .get_one::<PathBuf>("score")
        .ok_or("missing score path")?;
    let gt_path = matches
        .get_one::<PathBuf>("groundtruth")
        .ok_or("missing groundtruth path")?;

    let start = Instant::now();
    let score = ResultMatrix::read(score_path)?;
    log::info!(
        "loaded {} in {:?}: {} queries x {} results",
        score_path.display(),
        start.elapsed(),
        score.num_queries(),
        score.num_ranks()
    );

    let start = Instant::now();
    let groundtruth = GroundTruth::read(gt_path)?;
    log::info!(
        "loaded {} in {:?}: {} queries x {} neighbors",
        gt_path.display(),
        start.elapsed(),
        groundtruth.n(),
        groundtruth.k()
    );

    let report = recall_report(&score, &groundtruth)?;
    if report.is_empty() {
        log::warn!(
            "no cutoff fits within {} results per query",
            score.num_ranks()
        );
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for (r, recall) in report {
        writeln!(out, "{}", format_recall(r, recall))?;
    }
    out.flush()?;

    Ok(())
}
