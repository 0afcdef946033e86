use anyhow::Result;
use chessmatch::{ChessError, ChessMatch, ChessPosition, PieceKind};
use clap::Parser;
use colored::Colorize;
use log::{info, warn, LevelFilter};

mod ui;

use ui::Console;

/// Two-player chess in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Do not clear the screen between turns
    #[arg(long)]
    no_clear: bool,

    /// Log level, overriding `RUST_LOG`
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }
    logger.init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let authors = env!("CARGO_PKG_AUTHORS").replace(':', ", ");
    info!("{name} {version} by {authors}");

    let mut console = Console::new(!args.no_clear);
    let mut game = ChessMatch::new();

    while !game.checkmate() {
        match play_turn(&mut game, &mut console) {
            Ok(true) => {}
            Ok(false) => {
                warn!("Input closed on turn {}, quitting", game.turn());
                return Ok(());
            }
            Err(err) => match err.downcast_ref::<ChessError>() {
                Some(reason) if reason.is_recoverable() => {
                    println!("{}", reason.to_string().red());
                    console.pause()?;
                }
                _ => return Err(err),
            },
        }
    }

    console.clear_screen();
    console.print_match(&game);

    Ok(())
}

/// Plays one move: source, hints, target, and the promotion choice if one is needed.
///
/// Returns `false` if `stdin` was closed before the move was complete.
fn play_turn(game: &mut ChessMatch, console: &mut Console) -> Result<bool> {
    console.clear_screen();
    console.print_match(game);
    println!();

    let Some(source) = read_position(console, "Source: ")? else {
        return Ok(false);
    };
    let hints = game.possible_moves(source)?;

    console.clear_screen();
    ui::print_board(&game.pieces(), Some(&hints));
    println!();

    let Some(target) = read_position(console, "Target: ")? else {
        return Ok(false);
    };
    game.perform_chess_move(source, target)?;

    let mut prompt = "Enter piece for promotion (B/N/R/Q): ";
    while game.promoted().is_some() {
        let Some(line) = console.read_line(prompt)? else {
            return Ok(false);
        };

        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) if PieceKind::from_promotion_code(code).is_some() => {
                game.replace_promoted_piece(code)?;
            }
            _ => prompt = "Invalid value! Enter piece for promotion (B/N/R/Q): ",
        }
    }

    Ok(true)
}

fn read_position(console: &mut Console, prompt: &str) -> Result<Option<ChessPosition>> {
    let Some(line) = console.read_line(prompt)? else {
        return Ok(None);
    };

    line.parse().map(Some)
}
