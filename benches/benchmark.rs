use criterion::{Criterion, criterion_group, criterion_main};

use cladepaint::alignment::{Alignment, match_taxa};
use cladepaint::color::{ColorTable, StateAlphabet};
use cladepaint::newick::{parse_str, to_newick};
use cladepaint::paint::{annotate, color_site};

const LEAF_COUNTS: &[usize] = &[100, 1_000, 10_000];

/// Caterpillar tree `((..(t0,t1),t2)..,tn);` with unanimous alignment rows,
/// so colouring has to walk the full depth.
fn caterpillar(num_leaves: usize) -> (String, Vec<(String, String)>) {
    let mut newick = String::new();
    for _ in 0..num_leaves - 1 {
        newick.push('(');
    }
    newick.push_str("t0:1");
    for i in 1..num_leaves {
        newick.push_str(&format!(",t{i}:1):1"));
    }
    // Last close belongs to the root, which takes no branch length.
    newick.truncate(newick.len() - 2);
    newick.push(';');

    let rows = (0..num_leaves)
        .map(|i| (format!("t{i}"), "Q".to_string()))
        .collect();
    (newick, rows)
}

fn bench_color_site(c: &mut Criterion) {
    let alphabet = StateAlphabet::amino_acid();
    let table = ColorTable::default_palette();

    for &n in LEAF_COUNTS {
        let (newick, rows) = caterpillar(n);
        let (tree, labels) = parse_str(&newick).unwrap();
        let alignment = Alignment::new(rows).unwrap();
        let row_for_label = match_taxa(&labels, &alignment).unwrap();

        c.bench_function(&format!("color_site/caterpillar-{n}"), |b| {
            b.iter(|| color_site(&tree, &alignment, &row_for_label, &alphabet, &table, 0).unwrap());
        });
    }
}

fn bench_write_annotated(c: &mut Criterion) {
    let alphabet = StateAlphabet::amino_acid();
    let table = ColorTable::default_palette();

    let (newick, rows) = caterpillar(1_000);
    let (tree, labels) = parse_str(&newick).unwrap();
    let alignment = Alignment::new(rows).unwrap();
    let row_for_label = match_taxa(&labels, &alignment).unwrap();
    let coloring = color_site(&tree, &alignment, &row_for_label, &alphabet, &table, 0).unwrap();
    let annotated = annotate(&tree, &coloring, true);

    c.bench_function("to_newick/caterpillar-1000-annotated", |b| {
        b.iter(|| to_newick(&tree, &labels, Some(&annotated)));
    });
}

criterion_group!(benches, bench_color_site, bench_write_annotated);
criterion_main!(benches);
