//! Row Hermite normal form over the integers.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Row-style Hermite normal form of an integer matrix given by rows.
///
/// The result spans the same `Z`-module as the input rows, is upper
/// triangular in echelon shape with positive pivots, every entry above a
/// pivot lies in `[0, pivot)`, and zero rows are dropped. Two generating
/// sets of the same lattice therefore produce identical output.
pub fn hermite_normal_form(mut rows: Vec<Vec<BigInt>>) -> Vec<Vec<BigInt>> {
    let cols = rows.first().map(Vec::len).unwrap_or(0);
    let mut pivot_row = 0;
    for col in 0..cols {
        if pivot_row == rows.len() {
            break;
        }
        loop {
            let smallest = (pivot_row..rows.len())
                .filter(|&r| !rows[r][col].is_zero())
                .min_by(|&a, &b| rows[a][col].abs().cmp(&rows[b][col].abs()));
            let Some(best) = smallest else {
                break;
            };
            rows.swap(pivot_row, best);
            let mut done = true;
            for r in (pivot_row + 1)..rows.len() {
                if rows[r][col].is_zero() {
                    continue;
                }
                let q = rows[r][col].div_floor(&rows[pivot_row][col]);
                subtract_multiple(&mut rows, r, pivot_row, &q);
                if !rows[r][col].is_zero() {
                    done = false;
                }
            }
            if done {
                break;
            }
        }
        if rows[pivot_row][col].is_zero() {
            continue;
        }
        if rows[pivot_row][col].is_negative() {
            for value in rows[pivot_row].iter_mut() {
                *value = -&*value;
            }
        }
        for r in 0..pivot_row {
            let q = rows[r][col].div_floor(&rows[pivot_row][col]);
            if !q.is_zero() {
                subtract_multiple(&mut rows, r, pivot_row, &q);
            }
        }
        pivot_row += 1;
    }
    rows.truncate(pivot_row);
    rows
}

fn subtract_multiple(rows: &mut [Vec<BigInt>], target: usize, source: usize, factor: &BigInt) {
    let scaled: Vec<BigInt> = rows[source].iter().map(|v| v * factor).collect();
    for (dst, delta) in rows[target].iter_mut().zip(scaled) {
        *dst -= delta;
    }
}
