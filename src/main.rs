mod cli;

use torrentmate::{
    config,
    generators::{Generator, TorrentSettings},
    pipeline::Engine,
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "torrentmate=trace,torrentmate_av=trace,torrentmate_parser=trace,torrentmate_common=debug"
                .to_string()
        } else {
            "torrentmate=info,torrentmate_av=info,torrentmate_parser=info,torrentmate_common=warn"
                .to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process {
            folders,
            output_dir,
            tracker,
            no_torrent,
            dry_run,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(process_folders(
                folders,
                ProcessOptions {
                    output_dir,
                    tracker,
                    no_torrent,
                    dry_run,
                },
                cli.config.as_deref(),
            ))
        }
        Commands::Inspect { folder, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(inspect_folder(&folder, json, cli.config.as_deref()))
        }
        Commands::CheckTools => check_tools(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("torrentmate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

struct ProcessOptions {
    output_dir: Option<PathBuf>,
    tracker: Option<String>,
    no_torrent: bool,
    dry_run: bool,
}

async fn process_folders(
    folders: Vec<PathBuf>,
    options: ProcessOptions,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override config from CLI if specified
    if let Some(dir) = options.output_dir {
        config.output.dir = Some(dir);
    }
    if let Some(tracker) = options.tracker {
        config.torrent.tracker = tracker;
    }
    if options.no_torrent {
        config.output.torrent = false;
    }

    let engine = Engine::from_config(&config);
    let generator = (!options.dry_run).then(|| build_generator(&config));

    let total = folders.len();
    let items = engine
        .process_batch(folders, config.batch.parallelism, generator.as_ref())
        .await;

    let mut failed = 0;
    for item in &items {
        match &item.result {
            Ok(outcome) => {
                println!("✓ {}", outcome.folder.display());
                println!("  {}", outcome.token);
                for advisory in outcome.metadata.advisories() {
                    println!("  ! {}", advisory);
                }
                if options.dry_run {
                    println!("  [DRY RUN] No files written");
                }
                for artifact in &item.artifacts {
                    match &artifact.outcome {
                        Ok(()) => println!("  + {} {}", artifact.kind, artifact.path.display()),
                        Err(e) => println!("  ✗ {} {}: {}", artifact.kind, artifact.path.display(), e),
                    }
                }
            }
            Err(e) => {
                println!("✗ {}", e);
            }
        }
        if !item.is_success() {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} folders failed", failed, total);
    }

    Ok(())
}

fn build_generator(config: &config::Config) -> Generator {
    let output_dir = config
        .output
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let torrent = config.output.torrent.then(|| TorrentSettings {
        program: config
            .torrent
            .mktorrent_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("mktorrent")),
        tracker: config.torrent.tracker.clone(),
        piece_length: config.torrent.piece_length,
    });

    Generator::new(output_dir)
        .with_nfo(config.output.nfo)
        .with_bbcode(config.output.bbcode)
        .with_torrent(torrent)
}

async fn inspect_folder(folder: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let engine = Engine::from_config(&config);
    let outcome = engine.process_folder(folder).await?;

    if json {
        let json_str = serde_json::to_string_pretty(&outcome)?;
        println!("{}", json_str);
        return Ok(());
    }

    let meta = &outcome.metadata;
    let technical = meta.technical();
    println!("Folder: {}", outcome.folder.display());
    println!("Token: {}", outcome.token);
    println!("\nType: {}", meta.content_type());
    println!("Title: {}", meta.title());
    if let Some(year) = meta.year() {
        println!("Year: {}", year);
    }
    if let Some(marker) = meta.episodes() {
        println!("Episodes: {}", marker);
        println!("Seasons: {}", meta.identity().season_count());
    }
    println!("Media files: {}", meta.identity().media_file_count());

    println!("\nResolution: {}", technical.resolution);
    println!("Video codec: {}", technical.video_codec);
    println!("Source: {}", technical.source_hint);
    println!("Audio languages: {}", list_or_none(&technical.audio_languages));
    println!("Subtitle languages: {}", list_or_none(&technical.subtitle_languages));
    if let Some(minutes) = technical.runtime_minutes {
        println!("Runtime: {} min", minutes);
    }

    for advisory in meta.advisories() {
        println!("\n! {}", advisory);
    }

    Ok(())
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = torrentmate_av::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable all features.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Analyzer timeout: {}s", config.analyzer.timeout_secs);
    println!("  Media extensions: {}", config.scan.extensions.join(", "));
    println!("  Classifier precedence: {:?}", config.classifier.precedence);
    println!(
        "  Multi-language label: {}",
        config.naming.multi_language_label.as_deref().unwrap_or("(none)")
    );
    println!("  Tracker: {}", config.torrent.tracker);
    println!("  Piece length: 2^{}", config.torrent.piece_length);
    println!("  Parallelism: {}", config.batch.parallelism);

    Ok(())
}
