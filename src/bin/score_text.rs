use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use veriprose::models::{
    AnalysisResult, HumanizationResult, HumanizeOptions, HumanizeStyle, Intensity, ProgressEvent,
};
use veriprose::services::analysis::{AnalysisEngine, MetaDetector, RemoteParaphraser};
use veriprose::services::config_store::{ConfigStore, EngineConfig};
use veriprose::services::humanize::{Humanizer, ParaphraseResource};

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn parse_style(value: &str) -> Result<HumanizeStyle, String> {
    match value {
        "natural" => Ok(HumanizeStyle::Natural),
        "casual" => Ok(HumanizeStyle::Casual),
        "academic" => Ok(HumanizeStyle::Academic),
        "creative" => Ok(HumanizeStyle::Creative),
        other => Err(format!("unknown style: {}", other)),
    }
}

fn parse_intensity(value: &str) -> Result<Intensity, String> {
    match value {
        "light" => Ok(Intensity::Light),
        "medium" => Ok(Intensity::Medium),
        "heavy" => Ok(Intensity::Heavy),
        other => Err(format!("unknown intensity: {}", other)),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin score_text -- <path.txt> [--humanize] [--style <natural|casual|academic|creative>] [--intensity <light|medium|heavy>] [--seed <n>] [--max-iterations <n>] [--deadline-ms <n>] [--sentences <n>] [--out <json_path>]\n\nNotes:\n  - Humanization defaults to natural style at medium intensity.\n  - Set VERIPROSE_DISABLE_FILE_LOG=1 to log to console only."
        );
        return Ok(());
    }

    veriprose::init_logging();

    let path = args[1].clone();
    let do_humanize = has_flag(&args, "--humanize");
    let style = match parse_arg_value(&args, "--style") {
        Some(v) => parse_style(&v)?,
        None => HumanizeStyle::Natural,
    };
    let intensity = match parse_arg_value(&args, "--intensity") {
        Some(v) => parse_intensity(&v)?,
        None => Intensity::Medium,
    };
    let seed: Option<u64> = parse_arg_value(&args, "--seed").and_then(|s| s.parse().ok());
    let max_iterations: u32 = parse_arg_value(&args, "--max-iterations")
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    let deadline_ms: Option<u64> =
        parse_arg_value(&args, "--deadline-ms").and_then(|s| s.parse().ok());
    let sentences_n: usize = parse_arg_value(&args, "--sentences")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let out_path = parse_arg_value(&args, "--out");

    let text = std::fs::read_to_string(&path).map_err(|e| format!("read file failed: {}", e))?;
    let config = match ConfigStore::default_config_dir() {
        Some(dir) => ConfigStore::new(dir).load()?,
        None => EngineConfig::default(),
    };

    let engine = match MetaDetector::from_config(&config) {
        Some(detector) => {
            Arc::new(AnalysisEngine::with_external(&config, Arc::new(detector)))
        }
        None => Arc::new(AnalysisEngine::new(&config)),
    };

    let analysis = engine.analyze(&text).await;

    println!("File: {}", path);
    println!(
        "Length: {} chars, {} words",
        analysis.metadata.text_length, analysis.metadata.word_count
    );
    println!(
        "Score: {:.4}  Classification: {}  Confidence: {:.2}",
        analysis.score, analysis.classification, analysis.confidence
    );
    println!();

    println!("Signal breakdown:");
    let mut names: Vec<&String> = analysis.breakdown.keys().collect();
    names.sort();
    for name in names {
        match &analysis.breakdown[name] {
            Some(signal) => println!(
                "  {:<22} {:.4}  (weight {:.3})",
                name,
                signal.score,
                analysis.effective_weights.get(name).copied().unwrap_or(0.0)
            ),
            None => println!("  {:<22} unavailable", name),
        }
    }
    println!();

    println!("Sentence scores: {}", analysis.sentence_scores.len());
    for (i, s) in analysis.sentence_scores.iter().take(sentences_n).enumerate() {
        println!("[S{:03}] {:.4}  {}", i, s.score, preview(&s.text, 100));
    }
    if analysis.sentence_scores.len() > sentences_n {
        println!(
            "... ({} more sentences)",
            analysis.sentence_scores.len() - sentences_n
        );
    }

    let mut humanization: Option<HumanizationResult> = None;
    if do_humanize {
        let options = HumanizeOptions {
            style,
            intensity,
            max_iterations,
            seed,
            deadline_ms,
        };
        let resource = match RemoteParaphraser::from_config(&config) {
            Some(remote) => Arc::new(ParaphraseResource::with_remote(Arc::new(remote))),
            None => Arc::new(ParaphraseResource::new()),
        };
        let humanizer =
            Humanizer::with_config(engine.clone(), &config).with_paraphrase_resource(resource);

        println!();
        println!("Humanizing (style={}, intensity={})...", style, intensity);
        let (tx, mut rx) = mpsc::channel::<ProgressEvent>(16);
        let printer = tokio::spawn(async move {
            while let Some(ev) = rx.recv().await {
                if ev.detail.is_empty() {
                    println!("  [{}] {} ms", ev.stage, ev.elapsed_ms);
                } else {
                    println!("  [{}] {} ({} ms)", ev.stage, ev.detail, ev.elapsed_ms);
                }
            }
        });

        let result = humanizer.humanize(&text, &options, Some(tx)).await;
        let _ = printer.await;

        println!();
        println!(
            "Humanized ({} stages, {} ms):",
            result.stage_count, result.processing_time_ms
        );
        println!("{}", result.humanized);
        if let Some(v) = &result.self_verification {
            println!();
            println!(
                "Self-verification: passed={} score={:.4} classification={}",
                v.passed, v.score, v.classification
            );
            if !v.flagged_sentences.is_empty() {
                println!("  {} sentences still flagged", v.flagged_sentences.len());
            }
        }
        humanization = Some(result);
    }

    if let Some(out_path) = out_path {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Output {
            file: String,
            analysis: AnalysisResult,
            #[serde(skip_serializing_if = "Option::is_none")]
            humanization: Option<HumanizationResult>,
        }

        let out = Output {
            file: path.clone(),
            analysis,
            humanization,
        };

        let json = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        std::fs::write(&out_path, json).map_err(|e| format!("write out failed: {}", e))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
