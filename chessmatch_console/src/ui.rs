use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chessmatch::{ChessMatch, Color, Grid, MoveMask, Piece};
use colored::{ColoredString, Colorize};

/// Terminal front end: rendering the match and reading the player's input.
pub struct Console {
    clear: bool,
    buffer: String,
}

impl Console {
    /// If `clear` is set, the screen is wiped before every redraw.
    pub fn new(clear: bool) -> Self {
        Self {
            clear,
            buffer: String::with_capacity(64),
        }
    }

    pub fn clear_screen(&self) {
        if self.clear {
            print!("\x1B[H\x1B[2J");
        }
    }

    /// Prints `prompt` and reads one trimmed line from `stdin`.
    ///
    /// Returns `None` once `stdin` is closed.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<&str>> {
        print!("{prompt}");
        io::stdout().flush().context("Failed to flush stdout")?;

        self.buffer.clear();
        let bytes = io::stdin()
            .lock()
            .read_line(&mut self.buffer)
            .context("Failed to read line from stdin")?;

        // For ctrl + d
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(self.buffer.trim()))
    }

    /// Waits for the player to acknowledge a message before the screen is cleared.
    pub fn pause(&mut self) -> Result<()> {
        if self.clear {
            self.read_line("Press Enter to continue...")?;
        }
        Ok(())
    }

    /// Prints the board, captured pieces, turn, player to move and any check.
    pub fn print_match(&self, game: &ChessMatch) {
        print_board(&game.pieces(), None);
        println!();
        print_captured_pieces(game);
        println!();
        println!("Turn: {}", game.turn());

        if game.checkmate() {
            println!("{}", "CHECKMATE!".red().bold());
            println!("Winner: {}", game.current_player().opponent());
        } else {
            println!("Waiting player: {}", game.current_player());
            if game.check() {
                println!("{}", "CHECK!".red().bold());
            }
        }
    }
}

/// Prints the board with rank labels on the left and file labels underneath.
///
/// Cells set in `hints` get a highlighted background.
pub fn print_board(pieces: &Grid<Piece>, hints: Option<&MoveMask>) {
    let hints = hints.map(MoveMask::to_rows);

    for (row, cells) in pieces.to_rows().into_iter().enumerate() {
        print!("{} ", (pieces.rows() - row).to_string().blue());

        for (column, cell) in cells.into_iter().enumerate() {
            let highlight = hints.as_ref().is_some_and(|hints| hints[row][column]);
            print!("{} ", colored_cell(cell, highlight));
        }
        println!();
    }

    let files = (0..pieces.columns())
        .map(|column| ((b'a' + column as u8) as char).to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {}", files.blue());
}

fn colored_cell(cell: Option<Piece>, highlight: bool) -> ColoredString {
    let text = match cell {
        None => "-".normal(),
        Some(piece) if piece.color().is_white() => piece.to_string().bright_white().bold(),
        Some(piece) => piece.to_string().yellow().bold(),
    };

    if highlight {
        text.on_green()
    } else {
        text
    }
}

fn print_captured_pieces(game: &ChessMatch) {
    println!("Captured pieces:");

    for color in Color::iter() {
        let captured = game
            .captured_pieces()
            .filter(|piece| piece.color() == color)
            .map(|piece| piece.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let captured = format!("[{captured}]");
        let captured = match color {
            Color::White => captured.bright_white(),
            Color::Black => captured.yellow(),
        };
        println!("{color}: {captured}");
    }
}
