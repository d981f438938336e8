//! bluesolo - generate a blues solo and play it through the pedal chain
//!
//! Run with: cargo run --features device -- solo --key 57 --preset blues

use blues_solo::composition::{export::export_solo, Progression, ScaleType, Solo, SoloGenerator, SoloOptions};
use blues_solo::{AudioEngine, EngineConfig, Preset};
use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bluesolo")]
#[command(about = "Procedural blues solos through a virtual pedalboard", long_about = None)]
struct Cli {
    /// Effect preset: clean, blues, rock, lead, funk, autowah, ambient, reggae
    #[arg(short, long, default_value = "blues", global = true)]
    preset: Preset,

    /// Master volume 0.0-1.0
    #[arg(short, long, default_value = "0.3", global = true)]
    volume: f32,

    /// Seed for reproducible solos
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Write the solo as a JSON export document
    #[arg(short, long, global = true)]
    export: Option<PathBuf>,

    /// Generate (and export) without playing
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Free soloing over one scale
    Solo {
        /// Root note, MIDI (60 = C4)
        #[arg(short, long, default_value = "60")]
        key: u8,

        /// minor, major or blues
        #[arg(long, default_value = "blues")]
        scale: ScaleType,

        #[arg(long, default_value = "4")]
        phrases: usize,

        /// Notes per phrase
        #[arg(short, long, default_value = "8")]
        length: usize,

        #[arg(short, long, default_value = "120")]
        tempo: f32,
    },

    /// One lick per bar over a chord progression
    Progression {
        /// twelve_bar or eight_bar
        #[arg(default_value = "twelve_bar")]
        form: Progression,

        /// Root note, MIDI
        #[arg(short, long, default_value = "60")]
        key: u8,

        #[arg(short, long)]
        tempo: Option<f32>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut generator = match cli.seed {
        Some(seed) => SoloGenerator::with_seed(seed),
        None => SoloGenerator::new(),
    };

    let solo = match cli.command {
        Commands::Solo {
            key,
            scale,
            phrases,
            length,
            tempo,
        } => generator.generate_solo(&SoloOptions {
            key,
            scale_type: scale,
            num_phrases: phrases,
            phrase_length: length,
            tempo,
        })?,
        Commands::Progression { form, key, tempo } => {
            let solo = generator.generate_solo_over_progression(form, key)?;
            match tempo {
                Some(tempo) => solo.with_tempo(tempo),
                None => solo,
            }
        }
    };

    print_solo(&solo);

    if let Some(path) = &cli.export {
        std::fs::write(path, export_solo(&solo)?)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "exported solo");
    }

    if cli.silent {
        return Ok(());
    }

    let mut engine = AudioEngine::new(EngineConfig {
        master_volume: cli.volume,
        seed: cli.seed,
        ..EngineConfig::default()
    });
    engine.apply_preset(cli.preset)?;
    engine.initialize()?;

    let seconds = engine.play(&solo)?;
    info!(seconds, preset = %cli.preset, "playing");

    while engine.is_playing() {
        std::thread::sleep(Duration::from_millis(50));
    }
    // Let the last release and the room ring out
    std::thread::sleep(Duration::from_millis(1500));

    engine.dispose();
    Ok(())
}

fn print_solo(solo: &Solo) {
    let meta = &solo.metadata;
    match (meta.scale_type, meta.progression) {
        (_, Some(progression)) => println!("{} blues in {} at {} bpm", progression, meta.key, meta.tempo),
        (Some(scale), None) => println!("{} {} at {} bpm", meta.key, scale, meta.tempo),
        (None, None) => println!("{} at {} bpm", meta.key, meta.tempo),
    }

    if let Some(phrases) = solo.phrases() {
        for phrase in phrases {
            println!("  phrase {}: {}", phrase.number, line(&phrase.notes));
        }
    }
    if let Some(sections) = solo.sections() {
        for (bar, section) in sections.iter().enumerate() {
            println!("  bar {:>2} {:<3} {}", bar + 1, section.chord, line(&section.notes));
        }
    }

    let usage = solo.technique_usage();
    let techniques: Vec<&str> = usage.techniques.iter().map(|t| t.name()).collect();
    println!(
        "  {} notes, techniques: {}{}",
        solo.note_count(),
        techniques.join(", "),
        if usage.uses_blue_notes { " (blue notes)" } else { "" }
    );
}

fn line(notes: &[blues_solo::composition::Note]) -> String {
    notes
        .iter()
        .map(|note| match note.technique {
            blues_solo::composition::Technique::Normal => note.name.clone(),
            technique => format!("{}~{}", note.name, technique.name()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
