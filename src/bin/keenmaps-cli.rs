//! keenmaps-cli - Command-line interface for the Keen map codecs
//!
//! A command-line tool for inspecting and converting Commander Keen Galaxy
//! and Classic map files.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use keenmaps::classic::{decode_classic_map, encode_classic_map};
use keenmaps::galaxy::{decode_galaxy_map, slot_count, PlaneKind};
use keenmaps::tables::{sprite_name, EPISODE1_SPRITES, EPISODE2_SPRITES, EPISODE3_SPRITES};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "keenmaps-cli")]
#[command(about = "A CLI tool for Commander Keen Galaxy and Classic map files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every map in a Galaxy archive
    GalaxyList {
        /// Data file (GAMEMAPS)
        gamemaps: PathBuf,

        /// Index file (MAPHEAD)
        maphead: PathBuf,
    },

    /// Export one plane of a Galaxy map as CSV
    GalaxyExport {
        /// Data file (GAMEMAPS)
        gamemaps: PathBuf,

        /// Index file (MAPHEAD)
        maphead: PathBuf,

        /// Map number to export
        map_number: usize,

        /// Output CSV file
        output: PathBuf,

        /// Plane to export
        #[arg(short, long, value_enum, default_value_t = CliPlane::Background)]
        plane: CliPlane,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Show dimensions and sprite census of a Classic map file
    ClassicInfo {
        /// Classic map file
        input: PathBuf,

        /// Episode whose sprite name table to use
        #[arg(short, long, value_enum, default_value_t = CliEpisode::One)]
        episode: CliEpisode,
    },

    /// Decompress a Classic map file without decoding it
    ClassicDecompress {
        /// Compressed map file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Rewrite a Classic map file through decode and uncompressed encode
    ClassicRewrite {
        /// Input map file
        input: PathBuf,

        /// Output map file (stored uncompressed)
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliPlane {
    /// Background tile plane
    Background,
    /// Foreground tile plane
    Foreground,
    /// Sprite/object plane
    Sprite,
}

impl From<CliPlane> for PlaneKind {
    fn from(plane: CliPlane) -> Self {
        match plane {
            CliPlane::Background => PlaneKind::Background,
            CliPlane::Foreground => PlaneKind::Foreground,
            CliPlane::Sprite => PlaneKind::Sprite,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliEpisode {
    /// First episode sprite names
    One,
    /// Second episode sprite names
    Two,
    /// Third episode sprite names
    Three,
}

impl CliEpisode {
    fn table(self) -> &'static [(u16, &'static str)] {
        match self {
            CliEpisode::One => EPISODE1_SPRITES,
            CliEpisode::Two => EPISODE2_SPRITES,
            CliEpisode::Three => EPISODE3_SPRITES,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::GalaxyList { gamemaps, maphead } => {
            galaxy_list(&gamemaps, &maphead, cli.verbose, cli.quiet)
        }
        Commands::GalaxyExport {
            gamemaps,
            maphead,
            map_number,
            output,
            plane,
            force,
        } => galaxy_export(
            &gamemaps,
            &maphead,
            map_number,
            &output,
            plane.into(),
            force,
            cli.quiet,
        ),
        Commands::ClassicInfo { input, episode } => classic_info(&input, episode, cli.verbose),
        Commands::ClassicDecompress {
            input,
            output,
            force,
        } => classic_decompress(&input, &output, force, cli.quiet),
        Commands::ClassicRewrite {
            input,
            output,
            force,
        } => classic_rewrite(&input, &output, force, cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_output(output: &PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn galaxy_list(
    gamemaps: &PathBuf,
    maphead: &PathBuf,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let data = fs::read(gamemaps)?;
    let index = fs::read(maphead)?;
    let slots = slot_count(&index);

    if verbose {
        println!(
            "Index '{}' has {} slots, data file is {} bytes",
            maphead.display(),
            slots,
            data.len()
        );
    }

    let progress = if !quiet && slots > 16 {
        let pb = ProgressBar::new(slots as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Scanning maps...");
        Some(pb)
    } else {
        None
    };

    let mut found = 0;
    for slot in 0..slots {
        match decode_galaxy_map(&data, &index, slot) {
            Ok(Some(map)) => {
                found += 1;
                let line = format!(
                    "{:3}  {:16}  {}x{}  {} plane(s)",
                    slot,
                    map.name,
                    map.width,
                    map.height,
                    map.planes.len()
                );
                match &progress {
                    Some(pb) => pb.println(line),
                    None => println!("{}", line),
                }
            }
            Ok(None) => {}
            Err(e) => {
                let line = format!("{:3}  <corrupt: {}>", slot, e);
                match &progress {
                    Some(pb) => pb.println(line),
                    None => eprintln!("{}", line),
                }
            }
        }
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if !quiet {
        println!(
            "{} of {} slots occupied ({:.2?})",
            found,
            slots,
            start_time.elapsed()
        );
    }

    Ok(())
}

fn galaxy_export(
    gamemaps: &PathBuf,
    maphead: &PathBuf,
    map_number: usize,
    output: &PathBuf,
    kind: PlaneKind,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_output(output, force)?;

    let data = fs::read(gamemaps)?;
    let index = fs::read(maphead)?;

    let map = decode_galaxy_map(&data, &index, map_number)?
        .ok_or_else(|| format!("Map slot {} is empty", map_number))?;
    let plane = map
        .plane(kind)
        .ok_or_else(|| format!("Map '{}' does not store a {:?} plane", map.name, kind))?;

    let width = map.width as usize;
    let mut csv = String::new();
    for row in plane.words.chunks(width.max(1)) {
        let cells: Vec<String> = row.iter().map(|w| w.to_string()).collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    fs::write(output, csv)?;

    if !quiet {
        println!(
            "Exported {:?} plane of '{}' ({}x{}) to '{}'",
            kind,
            map.name,
            map.width,
            map.height,
            output.display()
        );
    }

    Ok(())
}

fn classic_info(
    input: &PathBuf,
    episode: CliEpisode,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = fs::read(input)?;
    let map = decode_classic_map(&file)?;

    println!("{}: {}x{} tiles", input.display(), map.width, map.height);

    let table = episode.table();
    let mut sprites = 0;
    for y in 0..map.height as usize {
        for x in 0..map.width as usize {
            let id = map.get_sprite(x, y).unwrap_or(0);
            if id == 0 {
                continue;
            }
            sprites += 1;
            if verbose {
                let name = sprite_name(table, id).unwrap_or("?");
                println!("  sprite {:3} ({}) at ({}, {})", id, name, x, y);
            }
        }
    }
    println!("{} sprite(s)", sprites);

    Ok(())
}

fn classic_decompress(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_output(output, force)?;

    let start_time = Instant::now();
    let file = fs::read(input)?;
    let decompressed = keenmaps::classic::decompress(&file)?;
    fs::write(output, &decompressed)?;

    if !quiet {
        println!(
            "Decompressed {} -> {} bytes in {:.2?}",
            file.len(),
            decompressed.len(),
            start_time.elapsed()
        );
    }

    Ok(())
}

fn classic_rewrite(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_output(output, force)?;

    let file = fs::read(input)?;
    let map = decode_classic_map(&file)?;
    let rewritten = encode_classic_map(&map)?;
    fs::write(output, &rewritten)?;

    if !quiet {
        println!(
            "Rewrote '{}' ({}x{}) uncompressed to '{}' ({} bytes)",
            input.display(),
            map.width,
            map.height,
            output.display(),
            rewritten.len()
        );
    }

    Ok(())
}
