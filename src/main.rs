// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use contextual_translator::app_config::{Config, LlmProvider, LogLevel};
use contextual_translator::app_controller::Controller;

/// CLI Wrapper for LlmProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLlmProvider {
    Anthropic,
    Ollama,
}

impl From<CliLlmProvider> for LlmProvider {
    fn from(cli_provider: CliLlmProvider) -> Self {
        match cli_provider {
            CliLlmProvider::Anthropic => LlmProvider::Anthropic,
            CliLlmProvider::Ollama => LlmProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct LanguageArgs {
    /// Source language, as a name or ISO code (e.g. 'english', 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language, as a name or ISO code (e.g. 'spanish', 'es')
    #[arg(short, long)]
    target_language: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a single text and print the result
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        #[command(flatten)]
        languages: LanguageArgs,

        /// Also synthesize the translation and write the audio to FILE
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,
    },

    /// Start an interactive session with follow-up questions
    Chat {
        #[command(flatten)]
        languages: LanguageArgs,
    },

    /// List supported languages and their voices
    Voices,

    /// Generate shell completions for ctxtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ctxtrans - contextual translation assistant
///
/// Translates text with an LLM, keeps the last few translations as context
/// for follow-up questions, and reads translations aloud.
#[derive(Parser, Debug)]
#[command(name = "ctxtrans")]
#[command(version)]
#[command(about = "Contextual translation assistant with follow-up questions and speech")]
#[command(long_about = "ctxtrans translates text with an LLM, answers follow-up questions about recent translations, and synthesizes speech.

EXAMPLES:
    ctxtrans translate \"Good morning\" -t german           # Translate one sentence
    ctxtrans translate \"Hi\" -s en -t es --audio hi.mp3    # Translate and save audio
    ctxtrans chat -t japanese                             # Interactive session
    ctxtrans -p ollama -m llama3 chat                     # Use a local model
    ctxtrans voices                                       # List supported languages
    ctxtrans completions bash > ctxtrans.bash             # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// LLM provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliLlmProvider>,

    /// Model name to use
    #[arg(short, long, global = true)]
    model: Option<String>,
}

// Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // ANSI color for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The boxed logger accepts everything; the max level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "ctxtrans", &mut std::io::stdout());
            Ok(())
        }
        Commands::Voices => {
            let controller = Controller::with_config(load_config(&cli)?)?;
            println!("{}", controller.render_voices());
            Ok(())
        }
        Commands::Translate { text, languages, audio } => {
            let controller = build_controller(&cli)?;
            let (source, target) = controller.resolve_languages(
                languages.source_language.as_deref(),
                languages.target_language.as_deref(),
            )?;

            let outcome = controller
                .translate_once(text, &source, &target, audio.as_deref())
                .await?;
            println!("{}", Controller::render_outcome(&outcome));
            Ok(())
        }
        Commands::Chat { languages } => {
            let controller = build_controller(&cli)?;
            let (source, target) = controller.resolve_languages(
                languages.source_language.as_deref(),
                languages.target_language.as_deref(),
            )?;

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            controller.run_chat(stdin, tokio::io::stdout(), &source, &target).await?;
            Ok(())
        }
    }
}

fn build_controller(cli: &CommandLineOptions) -> Result<Controller> {
    let config = load_config(cli)?;
    config.validate().context("Configuration validation failed")?;
    Controller::with_config(config)
}

// Load or create the configuration, then apply CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = load_or_create(&cli.config)?;

    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn load_or_create(path: &Path) -> Result<Config> {
    if path.exists() {
        return Config::from_file(path);
    }

    warn!("Config file not found at '{}', creating default config.", path.display());
    let config = Config::default();
    config.save(path)?;
    Ok(config)
}
