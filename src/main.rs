//! Isolation-Agent: play and benchmark Isolation agents from the command line.
//!
//! ## Usage
//!
//! - `isolation-agent` - Show a demo
//! - `isolation-agent play` - Play one game between two agents
//! - `isolation-agent tournament` - Pit the searching agents against baselines
//!
//! Set `RUST_LOG=debug` to see per-depth search progress.

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};

use isolation_agent::agent::{Agent, AgentConfig, AgentKind, AlphaBetaPlayer};
use isolation_agent::board::Board;
use isolation_agent::clock::TurnClock;
use isolation_agent::constants::{
    DEFAULT_HEIGHT, DEFAULT_SEARCH_DEPTH, DEFAULT_WIDTH, NUM_MATCHES, OPENING_PLIES, TIME_LIMIT,
    TIMER_THRESHOLD,
};
use isolation_agent::eval::Heuristic;
use isolation_agent::game::Game;
use isolation_agent::tournament::{TournamentSettings, round_robin};

/// Isolation-Agent: time-bounded adversarial search for Isolation
#[derive(Parser)]
#[command(name = "isolation-agent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and print the final board
    Play {
        #[command(flatten)]
        common: CommonArgs,
        /// Agent playing first
        #[arg(long, value_enum, default_value_t = AgentKind::AlphaBeta)]
        first: AgentKind,
        /// Heuristic of the first agent
        #[arg(long, value_enum, default_value_t = Heuristic::Improved)]
        first_heuristic: Heuristic,
        /// Agent playing second
        #[arg(long, value_enum, default_value_t = AgentKind::Minimax)]
        second: AgentKind,
        /// Heuristic of the second agent
        #[arg(long, value_enum, default_value_t = Heuristic::OpenMoves)]
        second_heuristic: Heuristic,
    },
    /// Play every listed heuristic (as alpha-beta) against a field of baseline agents
    Tournament {
        #[command(flatten)]
        common: CommonArgs,
        /// Heuristics to evaluate
        #[arg(long, value_enum, num_args = 1.., default_values_t = [Heuristic::Improved, Heuristic::CenterDistance, Heuristic::OpponentDistance])]
        heuristics: Vec<Heuristic>,
        /// Match pairs per pairing
        #[arg(long, default_value_t = NUM_MATCHES)]
        matches: usize,
        /// Random plies before the agents take over
        #[arg(long, default_value_t = OPENING_PLIES)]
        opening: usize,
    },
    /// Run a short demo of the board and search
    Demo,
}

#[derive(Args)]
struct CommonArgs {
    /// Board width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// Per-turn time limit in milliseconds
    #[arg(long, default_value_t = TIME_LIMIT)]
    time_limit: u64,
    /// Milliseconds left at which search gives up
    #[arg(long, default_value_t = TIMER_THRESHOLD)]
    threshold: f64,
    /// Depth for minimax agents
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: usize,
    /// Seed for random agents and openings
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl CommonArgs {
    fn validate(&self) -> Result<()> {
        ensure!(self.width > 0 && self.height > 0, "board must be at least 1x1");
        ensure!(self.depth > 0, "search depth must be at least 1");
        ensure!(
            self.threshold >= 0.0 && self.threshold < self.time_limit as f64,
            "threshold ({} ms) must be below the time limit ({} ms)",
            self.threshold,
            self.time_limit
        );
        Ok(())
    }

    fn agent(&self, kind: AgentKind, heuristic: Heuristic) -> AgentConfig {
        AgentConfig {
            search_depth: self.depth,
            timer_threshold: self.threshold,
            ..AgentConfig::new(kind, heuristic)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            common,
            first,
            first_heuristic,
            second,
            second_heuristic,
        }) => {
            common.validate()?;
            let first = common.agent(first, first_heuristic);
            let second = common.agent(second, second_heuristic);
            run_game(&common, &first, &second);
        }
        Some(Commands::Tournament {
            common,
            heuristics,
            matches,
            opening,
        }) => {
            common.validate()?;
            let settings = TournamentSettings {
                width: common.width,
                height: common.height,
                num_matches: matches,
                time_limit: common.time_limit,
                opening_plies: opening,
                seed: common.seed,
            };
            run_tournament(&common, &heuristics, &settings);
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn run_game(common: &CommonArgs, first: &AgentConfig, second: &AgentConfig) {
    println!("{first} (Player 1) vs {second} (Player 2)\n");
    let board = Board::with_size(common.width, common.height);
    let result = Game::from_board(board, first.build(common.seed), second.build(common.seed.wrapping_add(1)))
        .with_time_limit(common.time_limit)
        .play();

    println!("{}", result.board);
    println!("Winner: {} ({})", result.winner, result.outcome);
    println!("Move history: {:?}", result.history);
}

fn run_tournament(common: &CommonArgs, heuristics: &[Heuristic], settings: &TournamentSettings) {
    let contenders: Vec<AgentConfig> = heuristics
        .iter()
        .map(|&h| common.agent(AgentKind::AlphaBeta, h))
        .collect();
    let opponents = [
        common.agent(AgentKind::Random, Heuristic::Null),
        common.agent(AgentKind::Minimax, Heuristic::OpenMoves),
        common.agent(AgentKind::Minimax, Heuristic::Center),
        common.agent(AgentKind::Minimax, Heuristic::Improved),
        common.agent(AgentKind::AlphaBeta, Heuristic::OpenMoves),
        common.agent(AgentKind::AlphaBeta, Heuristic::Center),
        common.agent(AgentKind::AlphaBeta, Heuristic::Improved),
    ];

    println!(
        "Playing {} match pairs per pairing on a {}x{} board ({} ms per move)\n",
        settings.num_matches, settings.width, settings.height, settings.time_limit
    );
    let table = round_robin(&contenders, &opponents, settings);

    for (contender, row) in contenders.iter().zip(&table) {
        println!("=== {contender} ===");
        let (mut wins, mut games) = (0, 0);
        for report in row {
            println!(
                "  vs {:<24} {:>3} - {:<3} (faults: {} / {})",
                report.opponent, report.wins, report.losses, report.agent_faults, report.opponent_faults
            );
            wins += report.wins;
            games += report.games();
        }
        let rate = if games > 0 { 100.0 * wins as f64 / games as f64 } else { 0.0 };
        println!("  Win rate: {rate:.1}%\n");
    }
}

fn run_demo() -> Result<()> {
    println!("Isolation-Agent: time-bounded alpha-beta search\n");

    println!("=== Board Demo ===");
    let mut board = Board::new();
    board.apply_move((2, 3)).context("placing player 1")?;
    board.apply_move((0, 5)).context("placing player 2")?;
    println!("{board}");
    let moves = board.legal_moves();
    println!("{} to move, {} legal moves: {:?}\n", board.active_player(), moves.len(), moves);

    let next = board.forecast_move((1, 2)).context("forecasting (1, 2)")?;
    println!("Forecast after (1, 2) (board unchanged):\n{next}");

    println!("=== Search Demo ===");
    let clock = TurnClock::start(TIME_LIMIT);
    let mut player = AlphaBetaPlayer::new(Heuristic::Improved);
    let best = player.get_move(&board, &|| clock.time_left());
    println!(
        "Best move: {:?} (searched to depth {} with {:.1} ms to spare)",
        best,
        player.completed_depth(),
        clock.time_left()
    );
    Ok(())
}
