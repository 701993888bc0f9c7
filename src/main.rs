use anyhow::Result;
use clap::{CommandFactory, Parser};
use signtype::classify::{Classifier, LabelTable, SignClassifier};
use signtype::cli::{Cli, Commands};
use signtype::config::Config;
use signtype::pipeline::orchestrator::{Pipeline, PipelineConfig, PipelineHandle};
use signtype::pipeline::sink::StdoutSink;
use signtype::pipeline::types::FramePayload;
use signtype::source::{JsonlSource, LandmarkSource};
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(&cli)?;
            run_replay(&cli, config)?;
        }
        Some(Commands::Check) => {
            let config = load_config(&cli)?;
            run_check(&config)?;
        }
        Some(Commands::Labels) => {
            let config = load_config(&cli)?;
            run_labels(&config)?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "signtype", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order (lowest to highest):
/// 1. Built-in defaults
/// 2. Config file (--config path, or ./signtype.toml if present)
/// 3. Environment variable overrides
/// 4. Command-line flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = cli.config.as_deref() {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    }
    .with_env_overrides();

    if let Some(model) = &cli.model {
        config.classifier.model = model.clone();
    }
    if let Some(labels) = &cli.labels {
        config.classifier.labels = labels.clone();
    }
    if let Some(min_confidence) = cli.min_confidence {
        config.gate.min_confidence = min_confidence;
    }
    if let Some(cooldown) = cli.cooldown {
        config.gate.cooldown_ms = cooldown.as_millis() as u64;
    }

    config.validate()?;
    Ok(config)
}

/// Replay a recorded landmark stream through the pipeline and print the
/// assembled text at the end.
fn run_replay(cli: &Cli, config: Config) -> Result<()> {
    let classifier = SignClassifier::load(&config.classifier)?;
    if let Err(e) = classifier.verify() {
        eprintln!("signtype: warning: {}", e);
    }
    if !cli.quiet {
        eprintln!(
            "signtype: {} loaded ({} labels)",
            classifier.model_name(),
            classifier.label_count()
        );
    }

    let mut source: Box<dyn LandmarkSource> = match cli.input.as_deref() {
        Some(path) => Box::new(JsonlSource::open(path)?),
        None => Box::new(JsonlSource::new(BufReader::new(std::io::stdin()))),
    };

    let pipeline_config = PipelineConfig {
        gate: config.gate.to_gate_config(),
        frame_buffer: config.pipeline.frame_buffer,
        display_buffer: config.pipeline.display_buffer,
    };
    let handle = Pipeline::new(pipeline_config)
        .start(Arc::new(classifier), Box::new(StdoutSink::new()))?;

    drive_source(source.as_mut(), &handle, cli.interval);

    match handle.stop() {
        Some(text) => println!("{}", text),
        None => eprintln!("signtype: pipeline stopped without final text"),
    }

    Ok(())
}

/// Feed frame events from a source into the pipeline at a fixed pace.
///
/// Source read errors are surfaced to the recognizer as extraction
/// failures so a corrupt line re-arms the gate without halting replay.
fn drive_source(source: &mut dyn LandmarkSource, handle: &PipelineHandle, interval: Duration) {
    loop {
        let payload = match source.next_event() {
            Ok(Some(payload)) => payload,
            Ok(None) => break,
            Err(e @ signtype::SigntypeError::FrameParse { .. }) => {
                eprintln!("signtype: {}", e);
                handle.submit_extraction_failed(e.to_string());
                continue;
            }
            Err(e) => {
                eprintln!("signtype: {}", e);
                break;
            }
        };

        let accepted = match payload {
            FramePayload::Landmarks(set) => handle.submit_landmarks(set),
            FramePayload::NoHand => handle.submit_no_hand(),
            FramePayload::ExtractionFailed(message) => handle.submit_extraction_failed(message),
        };
        if !accepted && !handle.is_running() {
            break;
        }

        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
}

/// Validate that the model and label table load and agree in shape.
fn run_check(config: &Config) -> Result<()> {
    let classifier = SignClassifier::load(&config.classifier)?;
    classifier.verify()?;
    println!(
        "ok: {} ({} labels)",
        config.classifier.model.display(),
        classifier.label_count()
    );
    Ok(())
}

/// Print the label table with the score index each label occupies.
fn run_labels(config: &Config) -> Result<()> {
    let labels = LabelTable::load(&config.classifier.labels)?;
    for (idx, label) in labels.iter().enumerate() {
        if label.is_empty() {
            println!("  [{}] (unused slot)", idx);
        } else {
            println!("  [{}] {}", idx, label);
        }
    }
    Ok(())
}
