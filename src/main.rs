//! gen-speech - Convert text files to narrated speech audio using XTTS-v2

mod audio;
mod config;
mod text;
mod tts;

use anyhow::{Context, Result};
use audio::Assembler;
use audio::encoder::{OutputFormat, create_encoder, is_ffmpeg_available};
use audio::tags::AudioTags;
use clap::{Parser, Subcommand};
use config::SpeechConfig;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gen-speech")]
#[command(about = "Convert text files to narrated speech audio using XTTS-v2", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the input text file
    input_file: Option<PathBuf>,

    /// Output file path (default: <input-name>.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to speaker reference audio for voice cloning
    #[arg(long)]
    voice: Option<PathBuf>,

    /// Language code for synthesis (e.g. "en")
    #[arg(long)]
    language: Option<String>,

    /// Use GPU acceleration for the model
    #[arg(long, default_value_t = false)]
    gpu: bool,

    /// Output format: mp3 or wav
    #[arg(long, default_value = "mp3")]
    format: String,

    /// Title tag for the output file (default: input file name)
    #[arg(long)]
    title: Option<String>,

    /// Artist tag for the output file
    #[arg(long)]
    artist: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the XTTS model directory
    SetModelDir {
        /// Path to the model directory (config.json + checkpoint)
        path: PathBuf,
    },
    /// Set the default speaker reference audio
    SetVoice {
        /// Path to speaker reference audio
        path: PathBuf,
    },
    /// Set the default synthesis language
    SetLanguage {
        /// Language code (e.g. "en")
        code: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let input_file = args
        .input_file
        .clone()
        .context("No input file provided. Usage: gen-speech <text-file>")?;

    let mut config = SpeechConfig::load()?;
    if let Some(voice) = &args.voice {
        config.speaker_ref = Some(voice.clone());
    }
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    if args.gpu {
        config.use_gpu = true;
    }

    let format = OutputFormat::from_extension(&args.format)
        .with_context(|| format!("Unsupported output format: {}", args.format))?;
    if format == OutputFormat::Mp3 && !is_ffmpeg_available() {
        anyhow::bail!("ffmpeg not found on PATH; required for mp3 output");
    }

    let input_text = std::fs::read_to_string(&input_file)
        .with_context(|| format!("Failed to read {}", input_file.display()))?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| input_file.with_extension(format.extension()));

    let cost = tts::estimate_cost(input_text.chars().count(), tts::PRICE_PER_1K_CHARS);
    info!("estimated cost: ${cost:.3}");

    let (model_dir, speaker_ref) = config.resolve_paths()?;
    info!("loading XTTS model from {}", model_dir.display());
    let backend = tts::create_backend(&model_dir, &speaker_ref, &config.language, config.use_gpu)?;

    let assembler = Assembler::new(
        backend.as_ref(),
        &config.break_marker,
        config.max_chunk_chars,
        config.pause_ms,
    );
    let buffer = assembler.synthesize(&input_text)?;
    info!("assembled {:.1}s of audio", buffer.duration_secs());

    let title = args.title.clone().unwrap_or_else(|| {
        input_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let artist = args.artist.clone().unwrap_or_default();
    let tags = AudioTags::new(&title, &artist, &title);

    let encoder = create_encoder(format);
    encoder.write(&buffer, &tags, &output_path)?;

    println!("Saved audio to: {}", output_path.display());
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    let mut config = SpeechConfig::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetModelDir { path } => {
            config.model_dir = Some(path.clone());
            config.save()?;
            println!("Model directory set to {}", path.display());
        }
        ConfigAction::SetVoice { path } => {
            config.speaker_ref = Some(path.clone());
            config.save()?;
            println!("Speaker reference set to {}", path.display());
        }
        ConfigAction::SetLanguage { code } => {
            config.language = code.clone();
            config.save()?;
            println!("Language set to {code}");
        }
    }

    Ok(())
}
