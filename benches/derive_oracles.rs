use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rnng_oracle::{read_trees, DiscOracle, GenOracle, Oracle, OracleDataset, SynTree};

const TREEBANK_SRC: &str = include_str!("../demos/ptb-sample.trees");

fn derive_all(trees: &[SynTree]) -> usize {
  trees
    .iter()
    .map(|t| DiscOracle::from_tree(t).actions().len() + GenOracle::from_tree(t).actions().len())
    .sum()
}

fn criterion_benchmark(c: &mut Criterion) {
  let trees = read_trees(TREEBANK_SRC).unwrap();
  let oracles = trees
    .iter()
    .map(|t| Rc::new(DiscOracle::from_tree(t)))
    .collect::<Vec<_>>();
  let texts = oracles.iter().map(|o| o.to_text()).collect::<Vec<_>>();

  c.bench_function("read treebank", |b| {
    b.iter(|| read_trees(black_box(TREEBANK_SRC)).unwrap().len())
  });

  c.bench_function("derive oracles", |b| b.iter(|| derive_all(black_box(&trees))));

  c.bench_function("read oracle text", |b| {
    b.iter(|| {
      black_box(&texts)
        .iter()
        .map(|t| t.parse::<DiscOracle>().unwrap().len())
        .sum::<usize>()
    })
  });

  c.bench_function("build vocabularies", |b| {
    b.iter(|| OracleDataset::new(black_box(oracles.clone())).action2id.len())
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
