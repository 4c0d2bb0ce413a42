use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use stache_parse::Input;
use stache_syntax::SyntaxKind::{self, *};

fn mustache(name: &'static str) -> [(SyntaxKind, &'static str); 3] {
    [(OPEN, "{{"), (ID, name), (CLOSE, "}}")]
}

fn simple() -> Input {
    let mut pieces = vec![(CONTENT, "<p>Hello, ")];
    pieces.extend(mustache("name"));
    pieces.push((CONTENT, "!</p>\n"));
    Input::from_pieces(pieces).unwrap()
}

fn medium() -> Input {
    let mut pieces = Vec::new();
    for _ in 0..50 {
        pieces.extend([
            (OPEN_BLOCK, "{{#"),
            (ID, "each"),
            (WHITESPACE, " "),
            (ID, "people"),
            (WHITESPACE, " "),
            (ID, "sort"),
            (EQUALS, "="),
            (STRING, "\"name\""),
            (CLOSE, "}}"),
            (CONTENT, "\n  <li>"),
        ]);
        pieces.extend(mustache("firstName"));
        pieces.push((CONTENT, " "));
        pieces.extend([(OPEN, "{{"), (ID, "this"), (SEP, "."), (ID, "lastName"), (CLOSE, "}}")]);
        pieces.extend([
            (CONTENT, "</li>\n"),
            (OPEN_INVERSE, "{{else"),
            (CLOSE, "}}"),
            (CONTENT, "nobody"),
            (OPEN_PARTIAL, "{{>"),
            (WHITESPACE, " "),
            (ID, "footer"),
            (CLOSE, "}}"),
            (OPEN_ENDBLOCK, "{{/"),
            (ID, "each"),
            (CLOSE, "}}"),
        ]);
    }
    Input::from_pieces(pieces).unwrap()
}

/// Every mustache is missing pieces, so recovery runs all the time.
fn broken() -> Input {
    let mut pieces = Vec::new();
    for _ in 0..50 {
        pieces.extend([
            (OPEN_BLOCK, "{{#"),
            (ID, "if"),
            (WHITESPACE, " "),
            (ID, "key"),
            (EQUALS, "="),
            (OPEN, "{{"),
            (ID, "a"),
            (SEP, "."),
            (INVALID, "%"),
            (CONTENT, "text"),
            (OPEN_ENDBLOCK, "{{/"),
            (CLOSE, "}}"),
        ]);
    }
    Input::from_pieces(pieces).unwrap()
}

fn benchmark_parser(c: &mut Criterion) {
    let inputs = vec![("Simple", simple()), ("Medium", medium()), ("Broken", broken())];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, input) in &inputs {
        group.throughput(Throughput::Bytes(input.text().len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_template", name), input, |b, input| {
            b.iter(|| {
                let parse = stache_parse::template(input);
                black_box(parse);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
