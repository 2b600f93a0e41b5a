mod protocol;
mod visualization;

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use carcassonne::Grid;
use carcassonne_ai::{RuleBasedAi, RuleSettings};
use clap::Parser;
use tracing::{debug, info, trace};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::protocol::{
    compare_rank, validate_tile, CandidateMove, CandidateMoves, Okay, Request, Response, Seat,
    TileDescription, TileStack,
};
use crate::visualization::visualize_grid;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON file with the rule settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of players in the game, overrides the config file
    #[arg(short, long)]
    players: Option<usize>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let mut settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => RuleSettings::default(),
    };
    if let Some(players) = args.players {
        settings.player_count = players;
    }
    debug!("{:?}", settings);

    RuleBasedBot::new(settings, seed).run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn load_settings(path: &Path) -> anyhow::Result<RuleSettings> {
    let file = File::open(path)
        .with_context(|| format!("Could not open config file '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid config file '{}'", path.display()))
}

type Comparator = fn(&CandidateMove, &CandidateMove) -> Ordering;

struct RuleBasedBot {
    ai: RuleBasedAi<CandidateMove, CandidateMoves, Comparator>,
    // Only exists during a game
    grid: Option<Grid<TileDescription>>,
}

impl RuleBasedBot {
    fn new(settings: RuleSettings, seed: u64) -> Self {
        Self {
            ai: RuleBasedAi::from_seed(
                settings,
                CandidateMoves::default(),
                compare_rank as Comparator,
                seed,
            ),
            grid: None,
        }
    }

    /// Returns `None` when the bot should shut down.
    fn handle_request(&mut self, req: Request) -> anyhow::Result<Option<Response>> {
        let response = match req {
            Request::NewGame {
                width,
                height,
                foundation,
            } => {
                self.grid = Some(Grid::new(width, height, foundation, &validate_tile)?);
                Response::Okay(Okay())
            }
            Request::TilePlaced { x, y, tile } => {
                let tile = validate_tile(tile)?;
                let grid = self.grid.as_mut().context("No game in progress")?;
                let placed = grid.place(x, y, tile)?;
                trace!("\n{}", visualize_grid(grid, glyph));
                Response::Placed { placed }
            }
            Request::ChooseMove {
                tiles,
                moves,
                free_meeples,
                stack_size,
            } => {
                let grid = self.grid.as_ref().context("No game in progress")?;
                *self.ai.generator_mut() = CandidateMoves(moves);
                let chosen = self.ai.calculate_best_move_for(
                    &tiles,
                    &Seat { free_meeples },
                    grid,
                    &TileStack { size: stack_size },
                );
                Response::ChosenMove { chosen }
            }
            Request::ChooseTileToDrop { tiles } => {
                Response::DroppedTile(self.ai.choose_tile_to_drop(&tiles)?.clone())
            }
            Request::Bye => return Ok(None),
        };
        Ok(Some(response))
    }

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr is used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the game has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;
            trace!(name: "Received request", request = %buf.trim_end());
            match self.handle_request(req)? {
                Some(response) => serde_json::to_writer(&mut stdout, &response)?,
                None => break Ok(()),
            }
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}

fn glyph(tile: &TileDescription) -> char {
    tile.name.chars().next().unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use carcassonne::{GridDirection, Regions};

    use super::*;

    fn tile(name: &str) -> TileDescription {
        TileDescription {
            name: String::from(name),
            regions: Regions(vec![vec![GridDirection::Left, GridDirection::Right]]),
        }
    }

    fn candidate(tile: &str, x: i32, y: i32, value: f64) -> CandidateMove {
        CandidateMove {
            tile: String::from(tile),
            x,
            y,
            meeple: None,
            value,
            field_move: false,
            rank: 0,
        }
    }

    fn started_bot() -> RuleBasedBot {
        let mut bot = RuleBasedBot::new(RuleSettings::default(), 7);
        let res = bot
            .handle_request(Request::NewGame {
                width: 3,
                height: 3,
                foundation: tile("D"),
            })
            .unwrap();
        assert!(matches!(res, Some(Response::Okay(_))));
        bot
    }

    #[test]
    fn requests_need_a_game() {
        let mut bot = RuleBasedBot::new(RuleSettings::default(), 7);
        let res = bot.handle_request(Request::TilePlaced {
            x: 0,
            y: 0,
            tile: tile("E"),
        });
        assert!(res.is_err());
    }

    #[test]
    fn tracks_placed_tiles() {
        let mut bot = started_bot();
        let placed = |bot: &mut RuleBasedBot, x, y| match bot
            .handle_request(Request::TilePlaced { x, y, tile: tile("E") })
            .unwrap()
        {
            Some(Response::Placed { placed }) => placed,
            _ => panic!("Expected a placement response"),
        };
        // The foundation is at (1, 1)
        assert!(!placed(&mut bot, 1, 1));
        assert!(placed(&mut bot, 0, 1));
        assert!(!placed(&mut bot, 0, 1));
        assert!(bot
            .handle_request(Request::TilePlaced {
                x: 3,
                y: 0,
                tile: tile("E")
            })
            .is_err());
    }

    #[test]
    fn skips_moves_onto_taken_cells() {
        let mut bot = started_bot();
        let res = bot
            .handle_request(Request::ChooseMove {
                tiles: vec![tile("E")],
                moves: vec![
                    candidate("E", 1, 1, 9.0),
                    candidate("E", 1, 0, 2.0),
                    candidate("F", 1, 2, 5.0),
                ],
                free_meeples: 3,
                stack_size: 40,
            })
            .unwrap();
        match res {
            Some(Response::ChosenMove { chosen: Some(m) }) => assert_eq!((m.x, m.y), (1, 0)),
            other => panic!("Unexpected response {:?}", other),
        }
    }

    #[test]
    fn passes_without_acceptable_moves() {
        let mut bot = started_bot();
        let res = bot
            .handle_request(Request::ChooseMove {
                tiles: vec![tile("E")],
                moves: vec![candidate("E", 0, 0, -2.0)],
                free_meeples: 3,
                stack_size: 40,
            })
            .unwrap();
        assert!(matches!(res, Some(Response::ChosenMove { chosen: None })));
    }

    #[test]
    fn drops_one_of_the_tiles() {
        let mut bot = started_bot();
        let res = bot
            .handle_request(Request::ChooseTileToDrop {
                tiles: vec![tile("E"), tile("F")],
            })
            .unwrap();
        match res {
            Some(Response::DroppedTile(dropped)) => {
                assert!(dropped.name == "E" || dropped.name == "F")
            }
            other => panic!("Unexpected response {:?}", other),
        }
        assert!(bot
            .handle_request(Request::ChooseTileToDrop { tiles: vec![] })
            .is_err());
    }

    #[test]
    fn bye_stops_the_bot() {
        let mut bot = started_bot();
        assert!(bot.handle_request(Request::Bye).unwrap().is_none());
    }
}
