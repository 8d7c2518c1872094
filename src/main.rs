// codexchange: detect, validate, convert and run code snippets from the terminal.
//
// Model API keys are read from the environment variables named in the model
// catalogue (OPENAI_API_KEY, ANTHROPIC_API_KEY, ...).

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use kodegen_tools_codexchange::{
    ConversionOutcome, ConversionRequest, Converter, ConverterConfig, ExecutionDispatcher,
    Language, LanguageDetector,
};
use kodegen_tools_codexchange::convert::ProgressFn;

#[derive(Parser)]
#[command(name = "codexchange", version, about = "Convert code between languages with LLMs")]
struct Cli {
    /// JSON config file (defaults are used when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// =============================================================================
// SUBCOMMANDS
// =============================================================================

#[derive(Subcommand)]
enum Commands {
    /// Detect the language of a snippet
    Detect {
        /// Source file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Print every candidate with its score as JSON
        #[arg(long)]
        explain: bool,
    },

    /// Check that a snippet is written in the given language
    Validate {
        #[arg(default_value = "-")]
        input: PathBuf,

        #[arg(short, long)]
        language: String,
    },

    /// Convert a snippet with a language model
    Convert {
        #[arg(default_value = "-")]
        input: PathBuf,

        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        to: String,

        /// Model selector (GPT, Claude, DeepSeek, Gemini, GROQ)
        #[arg(short, long, default_value = "GPT")]
        model: String,

        #[arg(long)]
        temperature: Option<f32>,

        /// Run the converted code afterwards
        #[arg(long)]
        run: bool,
    },

    /// Execute a snippet with the local toolchain
    Run {
        #[arg(default_value = "-")]
        input: PathBuf,

        #[arg(short, long)]
        language: String,

        /// Write the compiled artifact here, if the language produces one
        #[arg(long, value_name = "FILE")]
        artifact: Option<PathBuf>,
    },

    /// List detectable, convertible and executable languages
    Languages,
}

#[derive(Serialize)]
struct Candidate {
    language: Language,
    score: i32,
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read stdin")?;
        Ok(code)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => Ok(ConverterConfig::from_json_file(path)?),
        None => Ok(ConverterConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Detect { input, explain } => {
            let code = read_input(&input)?;
            let detector = LanguageDetector::default();
            if explain {
                let ranked: Vec<Candidate> = detector
                    .detect_scored(&code)
                    .into_iter()
                    .map(|(language, score)| Candidate { language, score })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                match detector.detect(&code) {
                    Some(language) => println!("{language}"),
                    None => println!("unknown"),
                }
            }
        }

        Commands::Validate { input, language } => {
            let code = read_input(&input)?;
            let validation = LanguageDetector::default().validate(&code, &language);
            if !validation.is_valid() {
                bail!(validation.explanation());
            }
            println!("ok");
        }

        Commands::Convert {
            input,
            from,
            to,
            model,
            temperature,
            run,
        } => {
            let code = read_input(&input)?;
            let converter = Converter::from_config(&config)?;
            let mut request = ConversionRequest::new(code, from, &to, model);
            request.temperature = temperature;

            let mut last_percent = 0;
            let mut report = |_: &str, fraction: f32| {
                let percent = (fraction * 100.0) as u32;
                if percent >= last_percent + 10 {
                    last_percent = percent;
                    eprint!("\rConverting - {percent}%");
                    let _ = std::io::stderr().flush();
                }
            };

            let progress: &mut ProgressFn<'_> = &mut report;
            let outcome = converter.convert(&request, Some(progress)).await?;
            eprintln!();

            match outcome {
                ConversionOutcome::Converted(converted) => {
                    println!("{converted}");
                    if run {
                        let dispatcher = ExecutionDispatcher::from_config(&config);
                        println!("{}", dispatcher.run(&converted, &to).await.text);
                    }
                }
                ConversionOutcome::Rejected(explanation) => bail!(explanation),
                ConversionOutcome::Skipped => bail!("Nothing to convert"),
            }
        }

        Commands::Run {
            input,
            language,
            artifact,
        } => {
            let code = read_input(&input)?;
            let dispatcher = ExecutionDispatcher::from_config(&config);
            let report = dispatcher.run(&code, &language).await;
            println!("{}", report.text);

            if let (Some(path), Some(bytes)) = (artifact, report.artifact) {
                std::fs::write(&path, bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Artifact written to {}", path.display());
            }
        }

        Commands::Languages => {
            let detector = LanguageDetector::default();
            let dispatcher = ExecutionDispatcher::from_config(&config);
            let detectable: Vec<Language> = detector.registry().languages().collect();
            let listing = serde_json::json!({
                "detectable": detectable,
                "convertible": config.languages(),
                "executable": dispatcher.supported_languages(),
                "models": config.models().iter().map(|m| &m.name).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}
