use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use log::info;
use std::{fs, path::PathBuf};
use sudogen_core::{Board, Game, Level};

#[derive(Parser, Debug)]
#[command(name = "sudogen", version, about = "Sudoku puzzle generator, validator and solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new puzzle for a difficulty level
    Generate {
        /// Level name, case-insensitive (see `levels`)
        #[arg(short, long, default_value = "easy")]
        level: String,
        /// Emit the full game state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve a board read from a file or stdin
    Solve {
        /// Path to a board (81 chars, 0/./_ for blanks). If omitted, reads from stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Validate a board and report every conflict
    Validate {
        /// Path to a board (81 chars, 0/./_ for blanks). If omitted, reads from stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the known difficulty levels
    Levels,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { level, json } => generate(&level, json),
        Command::Solve { input } => solve(&input),
        Command::Validate { input, json } => validate(&input, json),
        Command::Levels => {
            for level in Level::ALL {
                println!("{level}");
            }
            Ok(())
        }
    }
}

fn generate(name: &str, json: bool) -> Result<()> {
    let level = Level::from_name(name);
    if level == Level::Invalid {
        bail!("unknown level {name:?}; try `sudogen levels`");
    }

    let game = Game::new(level)?;
    info!(
        "generated {} puzzle with {} given cells",
        game.level(),
        game.locked_coordinates().len()
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    } else {
        print!("{}", game.board());
        println!(
            "{} {} ({} given cells)",
            "level:".bold(),
            game.level(),
            game.locked_coordinates().len()
        );
    }
    Ok(())
}

fn read_board(input: &Option<PathBuf>) -> Result<Board> {
    let text = match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Board::parse(&text).context("parse board")
}

fn solve(input: &Option<PathBuf>) -> Result<()> {
    let mut board = read_board(input)?;
    if !sudogen_core::solver::solve(&mut board) {
        bail!("board has no solution");
    }
    print!("{board}");
    Ok(())
}

fn validate(input: &Option<PathBuf>, json: bool) -> Result<()> {
    let board = read_board(input)?;

    // An Empty-level game is the one writable shape, so load the parsed
    // rows into it and run the report from there.
    let mut game = Game::new(Level::Empty)?;
    for (x, row) in board.rows().iter().enumerate() {
        game.set_data_row(x, *row)?;
    }

    let report = game.validate();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("{}", "board is complete and consistent".green());
    } else {
        for (kind, coords) in &report.errors {
            let cells: Vec<String> = coords.iter().map(|c| format!("({},{})", c.x, c.y)).collect();
            println!("{:>7}: {}", kind.to_string().yellow(), cells.join(" "));
        }
        println!("{} {}", "findings:".red().bold(), report.count);
    }
    Ok(())
}
