mod presenter;
mod sink;

use anyhow::{Context, Result};
use maskprime_experiment::{ExperimentConfig, Sequencer, SessionRunner, load_pool_from_path};
use presenter::ConsolePresenter;
use sink::JsonSink;
use std::fs::File;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let practice_path = args.next().unwrap_or_else(|| "practice.json".to_string());
    let test_path = args.next().unwrap_or_else(|| "stimuli.json".to_string());
    let config = match args.next() {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
            ExperimentConfig::from_reader(file).with_context(|| format!("loading config {path}"))?
        }
        None => ExperimentConfig::default(),
    };

    let practice = load_pool_from_path(&practice_path)
        .with_context(|| format!("loading practice pool {practice_path}"))?;
    let test =
        load_pool_from_path(&test_path).with_context(|| format!("loading test pool {test_path}"))?;
    log::info!(
        "loaded {} practice and {} test rows",
        practice.len(),
        test.len()
    );

    let sequencer = Sequencer::new(config.clone()).context("un-runnable experiment definition")?;
    let mut rng = rand::rng();
    let plans = sequencer.build_session(&practice, &test, &mut rng)?;

    let mut runner = SessionRunner::new(
        config,
        ConsolePresenter::new(),
        JsonSink::new("experiment_results.json"),
    );
    runner.run(&plans)?;
    Ok(())
}
