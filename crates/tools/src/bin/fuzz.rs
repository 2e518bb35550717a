use anyhow::Result;
use clap::Parser;
use crawl_core::{
    ActionKind, AttributeKind, Command, Direction, Game, Phase, Pos, SimConfig, TileKind,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    commands: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn pick_command(rng: &mut ChaCha8Rng, phase: Phase) -> Command {
    match phase {
        Phase::LevelUp => Command::ChooseLevelUpStat(choose(
            rng,
            &[AttributeKind::Arm, AttributeKind::Leg, AttributeKind::Body, AttributeKind::Mind],
        )),
        Phase::Targeting => {
            let y = (rng.next_u64() % 9) as i32 - 4;
            let x = (rng.next_u64() % 9) as i32 - 4;
            choose(rng, &[Command::CommitAttack { offset: Pos::new(y, x) }, Command::CancelTargeting])
        }
        // Bias toward walking so the run actually explores.
        _ => match rng.next_u64() % 10 {
            0..=5 => Command::Move(choose(rng, &Direction::ALL)),
            6 => Command::Wait,
            7 => Command::PickUpItem,
            8 => Command::EnterRangedTargeting,
            _ => {
                let ability = choose(rng, &ActionKind::ALL);
                choose(
                    rng,
                    &[Command::DescendStairs, Command::AscendStairs, Command::SelectAbility(ability)],
                )
            }
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} commands...", args.seed, args.commands);
    let mut game = Game::new(args.seed, SimConfig::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut accepted = 0;
    let mut rejected = 0;
    for _ in 0..args.commands {
        if game.phase() == Phase::Dead {
            println!("Player died on turn {} at depth {}", game.current_turn(), game.state().depth);
            break;
        }

        let before = game.snapshot_hash();
        let command = pick_command(&mut rng, game.phase());
        match game.submit(command) {
            Ok(_) => accepted += 1,
            Err(_) => {
                rejected += 1;
                assert_eq!(before, game.snapshot_hash(), "Invariant failed: rejection mutated state");
            }
        }

        // Assert invariants
        let state = game.state();
        for entity in state.entities.values() {
            assert!(entity.stats.hp() <= entity.stats.max_hp(), "Invariant failed: HP > Max HP");
            let tile = state.floors[entity.depth].tile_at(entity.pos);
            assert!(tile != TileKind::Wall, "Invariant failed: Entity inside wall");
        }
        assert_eq!(
            state.player().is_alive(),
            game.phase() != Phase::Dead,
            "Invariant failed: phase disagrees with player health"
        );
    }

    println!("Accepted {accepted}, rejected {rejected}, final turn {}", game.current_turn());
    println!("Fuzzing completed successfully.");
    Ok(())
}
