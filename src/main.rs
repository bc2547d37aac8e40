use bittoe::{
    core::{run_game, GameEndStatus, Player, PlayerMark},
    game::tictactoe::TTTBoard,
    player::{ConsolePlayer, MinMaxAi, RandomAi},
};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mark {
    X,
    O,
}

impl From<Mark> for PlayerMark {
    fn from(m: Mark) -> Self {
        match m {
            Mark::X => PlayerMark::Cross,
            Mark::O => PlayerMark::Naught,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Starter {
    Human,
    Computer,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Minimax,
    Random,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Tic-Tac-Toe on the command line against a computer that never loses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Who makes the first move
    #[arg(long, default_value = "human")]
    first: Starter,

    /// The mark the human plays
    #[arg(long, default_value = "x")]
    human_mark: Mark,

    /// What kind of player the computer is
    #[arg(long, default_value = "minimax")]
    opponent: Opponent,

    /// Search the top level moves of the minimax on all cores
    #[arg(long)]
    parallel: bool,

    /// Replace the human with a second minimax player
    #[arg(long)]
    self_play: bool,

    /// The seed for the random player (when used)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level.into()).init()?;

    let human_mark: PlayerMark = args.human_mark.into();
    let computer_mark = human_mark.other();
    let first = match args.first {
        Starter::Human => human_mark,
        Starter::Computer => computer_mark,
    };
    info!("Human plays {human_mark}, computer plays {computer_mark}, {first} starts");

    let human: Box<dyn Player<TTTBoard>> = if args.self_play {
        Box::new(MinMaxAi::new(human_mark).parallel(args.parallel))
    } else {
        Box::new(ConsolePlayer::new(human_mark))
    };
    let computer: Box<dyn Player<TTTBoard>> = match args.opponent {
        Opponent::Minimax => Box::new(MinMaxAi::new(computer_mark).parallel(args.parallel)),
        Opponent::Random => Box::new(RandomAi::new(args.seed)),
    };
    let (crosses, naughts) = match human_mark {
        PlayerMark::Cross => (human, computer),
        PlayerMark::Naught => (computer, human),
    };

    let (result, board) = run_game(crosses, naughts, first)?;
    match result {
        GameEndStatus::Won(p) if p == human_mark => println!("--==The player won==--"),
        GameEndStatus::Won(_) => println!("--==The computer won==--"),
        GameEndStatus::Draw => println!("--==It is a tie==--"),
    }
    print!("{board}");
    Ok(())
}
