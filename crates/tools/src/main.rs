use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use crawl_core::{
    CommandJournal, Game, GeneratedFloor, Pos, ReplayResult, SimConfig, TileKind, generate_floor,
    replay::replay_to_end,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Headless developer tools for the dungeon core", long_about = None)]
struct Args {
    /// TOML file with `SimConfig` overrides; missing keys keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: ToolCommand,
}

#[derive(Subcommand)]
enum ToolCommand {
    /// Print one generated floor as ASCII
    Map {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 0)]
        depth: usize,
    },
    /// Build a full run and summarize every floor
    Summary {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
    /// Replay a recorded command journal and print the final snapshot
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: SimConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

fn render_floor(floor: &GeneratedFloor) -> String {
    let mut rows: Vec<Vec<char>> = (0..floor.height)
        .map(|y| {
            (0..floor.width)
                .map(|x| {
                    let pos = Pos::new(y as i32, x as i32);
                    match floor.tile_at(pos) {
                        TileKind::Wall => '#',
                        TileKind::Floor => '.',
                        TileKind::Door => '+',
                        TileKind::Hall => ',',
                        TileKind::UpStair => '<',
                        TileKind::DownStair => '>',
                    }
                })
                .collect()
        })
        .collect();
    for spawn in &floor.item_spawns {
        rows[spawn.pos.y as usize][spawn.pos.x as usize] = '*';
    }
    for spawn in &floor.monster_spawns {
        rows[spawn.pos.y as usize][spawn.pos.x as usize] = 'm';
    }
    rows.into_iter().map(|row| row.into_iter().collect::<String>() + "\n").collect()
}

fn run_map(config: &SimConfig, seed: u64, depth: usize) -> Result<()> {
    if depth >= config.floor_count {
        bail!("depth {depth} is past the last floor ({} floors)", config.floor_count);
    }
    let floor = generate_floor(seed, depth, config).context("Map generation failed")?;
    print!("{}", render_floor(&floor));
    println!(
        "rooms: {}  monsters: {}  items: {}  entrance: {:?}  exit: {:?}",
        floor.rooms.len(),
        floor.monster_spawns.len(),
        floor.item_spawns.len(),
        floor.entrance,
        floor.exit
    );
    Ok(())
}

fn run_summary(config: SimConfig, seed: u64) -> Result<()> {
    let game = Game::new(seed, config).context("Run construction failed")?;
    let state = game.state();
    for floor in &state.floors {
        let monsters = floor.entities.iter().filter(|&&id| id != state.player_id).count();
        let open = floor.tiles().iter().filter(|tile| !tile.is_wall()).count();
        println!(
            "floor {:>2}: {}x{}  open cells: {:>5}  rooms: {:>2}  monsters: {:>2}  items: {:>2}",
            floor.depth,
            floor.width(),
            floor.height(),
            open,
            floor.rooms().len(),
            monsters,
            floor.items.len()
        );
    }
    println!("Snapshot Hash: {}", game.snapshot_hash());
    Ok(())
}

#[derive(Debug, Serialize)]
struct ReplaySummary {
    commands: usize,
    final_turn: u64,
    phase: String,
    snapshot_hash: u64,
}

impl From<ReplayResult> for ReplaySummary {
    fn from(result: ReplayResult) -> Self {
        Self {
            commands: result.commands_applied,
            final_turn: result.final_turn,
            phase: format!("{:?}", result.final_phase),
            snapshot_hash: result.final_snapshot_hash,
        }
    }
}

fn replay_file(path: &Path) -> Result<ReplaySummary> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let journal =
        CommandJournal::from_json(&journal_data).context("Failed to deserialize journal JSON")?;

    let result = replay_to_end(&journal).context("Replay failed during execution")?;
    Ok(result.into())
}

fn run_replay(path: &Path, json: bool) -> Result<()> {
    let summary = replay_file(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Replay complete.");
    println!("Commands: {}", summary.commands);
    println!("Final Turn: {}", summary.final_turn);
    println!("Phase: {}", summary.phase);
    println!("Snapshot Hash: {}", summary.snapshot_hash);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    info!(?config, "configuration loaded");

    match args.command {
        ToolCommand::Map { seed, depth } => run_map(&config, seed, depth),
        ToolCommand::Summary { seed } => run_summary(config, seed),
        ToolCommand::Replay { journal, json } => run_replay(&journal, json),
    }
}
