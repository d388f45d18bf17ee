use criterion::{criterion_group, criterion_main, Criterion};
use lib::chess::{Move, Position};

fn moves(c: &mut Criterion) {
    let pos = Position::default();
    c.bench_function("moves/startpos", |b| b.iter(|| pos.moves().count()));
}

fn play(c: &mut Criterion) {
    let game: Vec<Move> = ["d2d4", "e7e5", "d4e5", "f8c5", "b1c3", "c5f2"]
        .iter()
        .map(|m| m.parse().unwrap())
        .collect();

    c.bench_function("play/miniature", |b| {
        b.iter(|| {
            let mut pos = Position::default();
            for &m in &game {
                pos.play(m).unwrap();
            }

            pos
        })
    });
}

criterion_group!(benches, moves, play);
criterion_main!(benches);
