use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use zephyr_syntax::TreeBuilder;

fn benchmark_parser(c: &mut Criterion) {
    let medium = "const greeting = 'hello';\nlet count = 42;\nlet ratio = 1.5;\n".repeat(64);
    let inputs = [("Simple", "let x = 1;".to_owned()), ("Medium", medium)];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, code) in &inputs {
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", name), code, |b, code| {
            b.iter(|| black_box(zephyr_parse::parse(code)));
        });

        let tokens = zephyr_tokenizer::tokenize(code);
        group.bench_with_input(BenchmarkId::new("build", name), code, |b, code| {
            b.iter(|| black_box(TreeBuilder::build(code, &tokens)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
