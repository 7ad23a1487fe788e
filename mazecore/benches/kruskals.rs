use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mazecore::{Algorithm, AlgorithmKind, Maze};

const SIZE: (usize, usize) = (100, 100);

pub fn kruskals(c: &mut Criterion) {
    c.bench_function("kruskals", |b| {
        b.iter(|| {
            let mut maze = Maze::new(black_box(SIZE.0), black_box(SIZE.1)).unwrap();
            maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(black_box(7))))
                .unwrap();
            maze
        })
    });
}

pub fn solvers(c: &mut Criterion) {
    let mut maze = Maze::new(SIZE.0, SIZE.1).unwrap();
    maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(7)))
        .unwrap();

    for kind in AlgorithmKind::solvers() {
        c.bench_function(&format!("solve_{}", kind.alias()), |b| {
            b.iter(|| {
                let mut maze = maze.clone();
                maze.solve(&mut Algorithm::new(black_box(kind), None))
                    .unwrap()
                    .len()
            })
        });
    }
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = kruskals, solvers}
criterion_main!(benches);
