use criterion::{criterion_group, criterion_main, Criterion};
use dlx_solver::dlx::matrix::Matrix;
use dlx_solver::dlx::node::RowKey;
use dlx_solver::dlx::search::Dlx;
use dlx_solver::sudoku::solver::{Board, Sudoku, EXAMPLE_NINE};
use std::hint::black_box;
use std::time::Duration;

/// Builds the exact cover formulation of the Langford pairing problem for
/// `n` pairs.
///
/// Columns `0..n` require each value to be placed once; columns `n..3n`
/// require each of the `2n` slots to be filled once. An option places value
/// `i` in slots `s` and `s + i + 1`, so every exact cover is a Langford
/// sequence.
fn langford_matrix(n: usize) -> Matrix {
    let mut matrix = Matrix::new(3 * n).unwrap();
    let mut next_row: RowKey = 0;
    for i in 1..=n {
        for s in 0..2 * n {
            let partner = s + i + 1;
            if partner >= 2 * n {
                break;
            }
            for column in [i - 1, n + s, n + partner] {
                matrix.add_incidence(next_row, column).unwrap();
            }
            next_row += 1;
        }
    }
    matrix
}

fn bench_langford(c: &mut Criterion) {
    let mut group = c.benchmark_group("langford");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(20));

    for n in [4_usize, 7, 8] {
        let matrix = langford_matrix(n);
        group.bench_function(format!("{n} pairs"), |b| {
            b.iter(|| {
                let mut dlx = Dlx::new(matrix.clone());
                black_box(dlx.covers());
            })
        });
    }

    group.finish();
}

fn bench_sudoku(c: &mut Criterion) {
    let sudoku = Sudoku::new(Board::from(EXAMPLE_NINE));

    let mut group = c.benchmark_group("sudoku");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(20));

    group.bench_function("encode 9x9", |b| {
        b.iter(|| {
            black_box(sudoku.to_matrix().unwrap());
        })
    });

    group.bench_function("solve 9x9", |b| {
        let matrix = sudoku.to_matrix().unwrap();
        b.iter(|| {
            let mut dlx = Dlx::new(matrix.clone());
            black_box(dlx.covers());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_langford, bench_sudoku);

criterion_main!(benches);
