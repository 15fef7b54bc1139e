use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vibe_architect::core::interpreter::{find_balanced_object, interpret};

const ENVELOPE: &str = r#"{"type":"chart","content":"Volume por região","data":{"title":"Q3","items":[{"name":"Norte","value":120},{"name":"Sul","value":87.5},{"name":"Leste","value":64},{"name":"Oeste","value":143}]},"themeShift":"trust-blue"}"#;

fn wrapped_reply(prose_words: usize) -> String {
    let prose = "Aqui está a análise solicitada com base nos dados mais recentes. "
        .repeat(prose_words / 10 + 1);
    format!("{prose}\n\n{ENVELOPE}\n\n{prose}")
}

fn bench_interpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpret");

    for &words in &[0usize, 200, 2000] {
        let reply = wrapped_reply(words);
        group.throughput(Throughput::Bytes(reply.len() as u64));

        group.bench_with_input(BenchmarkId::new("envelope", words), &reply, |b, reply| {
            b.iter(|| interpret(reply))
        });
        group.bench_with_input(BenchmarkId::new("scan_only", words), &reply, |b, reply| {
            b.iter(|| find_balanced_object(reply))
        });
    }

    // Long prose with no envelope exercises the plain fallback.
    let plain = "Sem dados estruturados nesta resposta. ".repeat(500);
    group.bench_function("plain_fallback", |b| b.iter(|| interpret(&plain)));

    group.finish();
}

criterion_group!(benches, bench_interpret);
criterion_main!(benches);
