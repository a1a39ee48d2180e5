//! Interactive game loop and text board rendering.
//!
//! All rule decisions go through the core library; this module only
//! renders state, parses coordinate notation and picks whose turn it is.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use dobutsu_core::position::{DrawReason, GameResult, GameState};
use dobutsu_core::ruleset::Ruleset;
use dobutsu_core::search;
use dobutsu_core::types::{Action, Color, Hand, PieceType, Square};

/// Run one game. `human` is the side controlled from stdin; `None`
/// plays the computer against itself.
pub fn run(ruleset: Ruleset, depth: u8, human: Option<Color>, max_moves: u32) -> Result<()> {
    let mut state = GameState::new(Arc::new(ruleset));
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut plies = 0u32;

    loop {
        print_board(&state);
        let result = state.result();
        if result != GameResult::InProgress {
            print_result(result);
            return Ok(());
        }
        if plies >= max_moves {
            println!("Move limit reached after {plies} plies, stopping.");
            return Ok(());
        }

        let action = if human == Some(state.side_to_move()) {
            match read_action(&mut input)? {
                Some(action) => action,
                None => {
                    println!("Game aborted.");
                    return Ok(());
                }
            }
        } else {
            let Some(action) = search::find_best_action(&state, depth) else {
                // result() already reported InProgress, so the legal set
                // cannot be empty here
                log::warn!("search returned no action for an in-progress game");
                return Ok(());
            };
            println!("{} plays {action}", side_name(state.side_to_move()));
            action
        };

        match state.apply(action) {
            Ok(next) => {
                state = next;
                plies += 1;
            }
            Err(e) => println!("{e}"),
        }
    }
}

/// Prompt until a well-formed action or end of input. Legality is left
/// to `apply`; only the notation is checked here.
fn read_action(input: &mut impl BufRead) -> Result<Option<Action>> {
    let mut line = String::new();
    loop {
        print!("Your move (b2b3, b2b3+ or C*b3; 'quit' to stop): ");
        io::stdout().flush().context("failed to flush stdout")?;
        line.clear();
        let n = input.read_line(&mut line).context("failed to read stdin")?;
        if n == 0 {
            return Ok(None);
        }
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        if entry == "quit" || entry == "exit" {
            return Ok(None);
        }
        match Action::from_coord(entry) {
            Some(action) => return Ok(Some(action)),
            None => println!("Could not parse '{entry}'."),
        }
    }
}

/// Render the board with land's home rank on top, then both hands and
/// the side to move. Sky pieces are uppercase, land pieces lowercase.
fn print_board(state: &GameState) {
    let ruleset = state.ruleset();
    let board = state.board();

    let mut header = String::from(" ");
    for col in 0..ruleset.cols() {
        header.push(' ');
        header.push((b'a' + col) as char);
    }
    println!("{header}");

    for row in (0..ruleset.rows()).rev() {
        let mut line = format!("{}", row + 1);
        for col in 0..ruleset.cols() {
            let piece = board.piece_on(Square::new(row, col));
            line.push(' ');
            if piece.is_none() {
                line.push('.');
            } else {
                let letter = piece.piece_type().letter();
                line.push(match piece.color() {
                    Color::Sky => letter,
                    Color::Land => letter.to_ascii_lowercase(),
                });
            }
        }
        println!("{line}");
    }

    println!("Sky hand:  {}", hand_line(state.hand(Color::Sky)));
    println!("Land hand: {}", hand_line(state.hand(Color::Land)));
    println!("{} to move", side_name(state.side_to_move()));
}

fn hand_line(hand: Hand) -> String {
    if hand.is_empty() {
        return "-".to_string();
    }
    let mut line = String::new();
    for piece_type in PieceType::ALL {
        for _ in 0..hand.count(piece_type) {
            line.push(piece_type.letter());
        }
    }
    line
}

fn print_result(result: GameResult) {
    match result {
        GameResult::Win { winner } => println!("{} wins!", side_name(winner)),
        GameResult::Draw {
            reason: DrawReason::Stalemate,
        } => println!("Draw by stalemate."),
        GameResult::Draw {
            reason: DrawReason::Repetition,
        } => println!("Draw by repetition."),
        GameResult::InProgress => {}
    }
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::Sky => "Sky",
        Color::Land => "Land",
    }
}
