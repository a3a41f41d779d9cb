use crate::board::Board;
use crate::complexity::{BoxTarget, Level, Profile};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

const WORKERS: usize = 9;

/// Scatters randomized valid digits into each 3x3 box according to the
/// level's fill profile, one worker per box-task. The result is a
/// candidate only; the orchestrator decides whether it is solvable.
pub(crate) fn generate(level: Level) -> Board {
    if level == Level::Empty {
        return Board::new();
    }

    let profile = Profile::build(level);
    let board = Arc::new(Mutex::new(Board::new()));
    // Rendezvous channel: every box-task is handed straight to a worker.
    let (tx, rx) = mpsc::sync_channel::<BoxTarget>(0);
    let rx = Arc::new(Mutex::new(rx));

    let mut workers = Vec::with_capacity(WORKERS);
    for _ in 0..WORKERS {
        let board = Arc::clone(&board);
        let rx = Arc::clone(&rx);
        // Each worker owns an independent generator so concurrent tasks
        // never draw correlated sequences.
        workers.push(thread::spawn(move || {
            let mut rng = StdRng::from_rng(rand::thread_rng()).expect("seed worker rng");
            while let Some(target) = next_task(&rx) {
                fill_box(&board, target, &mut rng);
            }
        }));
    }

    for target in profile.boxes {
        tx.send(target).expect("workers outlive the open channel");
    }
    drop(tx); // closing the channel is the stop signal

    for worker in workers {
        worker.join().expect("generator worker panicked");
    }

    Arc::try_unwrap(board)
        .expect("all workers joined")
        .into_inner()
        .expect("board lock")
}

fn next_task(rx: &Mutex<Receiver<BoxTarget>>) -> Option<BoxTarget> {
    rx.lock().expect("task channel lock").recv().ok()
}

// One placement attempt per fill_count iteration. Holding the lock across
// the whole find-and-place step keeps every constraint check against a
// consistent snapshot of the full board.
fn fill_box(board: &Mutex<Board>, target: BoxTarget, rng: &mut StdRng) {
    for _ in 0..target.fill_count {
        let mut board = board.lock().expect("board lock");
        let Some((x, y)) = find_empty_in_box(&board, target, rng) else {
            debug!(
                "box at ({},{}) has no empty cell left, abandoning task",
                target.x_max, target.y_max
            );
            return;
        };
        place_random_digit(&mut board, x, y, rng);
    }
}

// Forward scan from a random cell inside the box, wrapping each axis back
// to its lower bound once; every cell is visited at most once before the
// scan gives up.
fn find_empty_in_box(board: &Board, target: BoxTarget, rng: &mut StdRng) -> Option<(usize, usize)> {
    let (x_min, y_min) = (target.x_max - 2, target.y_max - 2);
    let x = rng.gen_range(x_min..=target.x_max);
    let y = rng.gen_range(y_min..=target.y_max);
    let start = (x - x_min) * 3 + (y - y_min);
    for step in 0..9 {
        let offset = (start + step) % 9;
        let (x, y) = (x_min + offset / 3, y_min + offset % 3);
        if board.is_empty(x, y) {
            return Some((x, y));
        }
    }
    None
}

// Digit trial starts from a random seed in 1..=9 and wraps past 9 once;
// a cell where nothing fits abandons this single placement.
fn place_random_digit(board: &mut Board, x: usize, y: usize, rng: &mut StdRng) {
    let seed = rng.gen_range(1..=9u8);
    for step in 0..9 {
        let v = (seed - 1 + step) % 9 + 1;
        if board.is_valid(x, y, v) {
            board.set(x, y, v);
            return;
        }
    }
    debug!("no digit fits at ({x},{y}), skipping placement");
}
