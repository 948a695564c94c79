//! Criterion benchmarks measure time of the clearly separated pieces of code.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kingsguard::chess::board::Board;
use kingsguard::chess::core::{Player, Square};
use kingsguard::chess::legality::{is_checkmate, legal_move_map};
use kingsguard::chess::movegen::generate_pseudo_legal;

const POSITIONS: [&str; 4] = [
    "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR",
    "r3k2r/1p2n3/3q4/2B5/8/4N3/PP6/R3K2R",
    "r1bk3r/pPpp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
    "k3r3/8/8/8/8/1b5b/r7/4K3",
];

fn boards() -> Vec<Board> {
    POSITIONS
        .iter()
        .map(|placement| Board::try_from(*placement).unwrap())
        .collect()
}

fn pseudo_legal(c: &mut Criterion) {
    let boards = boards();
    let mut group = c.benchmark_group("Pseudo-legal move generation");
    let _ = group.throughput(Throughput::Elements(boards.len() as u64));
    let _ = group.bench_function("all squares", |b| {
        b.iter(|| {
            for board in &boards {
                for square in Square::iter() {
                    let _ = std::hint::black_box(generate_pseudo_legal(board, square));
                }
            }
        });
    });
    group.finish();
}

fn legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Legal move generation");
    for (placement, board) in POSITIONS.iter().zip(boards()) {
        let king = board.find_king(Player::White).unwrap();
        let _ = group.bench_with_input(BenchmarkId::new("legal_move_map", placement), &board, |b, board| {
            b.iter(|| std::hint::black_box(legal_move_map(board, Player::White, king)));
        });
        let _ = group.bench_with_input(BenchmarkId::new("is_checkmate", placement), &board, |b, board| {
            b.iter(|| std::hint::black_box(is_checkmate(board, king, Player::White)));
        });
    }
    group.finish();
}

criterion_group! {
    name = movegen;
    config = Criterion::default().sample_size(10);
    targets = pseudo_legal, legal
}
criterion_main!(movegen);
