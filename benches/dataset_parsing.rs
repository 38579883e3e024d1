//! Dataset parsing and cell formatting benchmarks
//!
//! Measures the CSV join stage in isolation, without rendering or export.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geninfo_format::{NumberKind, PropertyTable, format_number};
use geninfo_source::{DatasetParser, TerritoryTable};
use std::fmt::Write;
use std::hint::black_box;

const TERRITORIES: &str = "\
Código,Logo 1 reas,Logo 2 mercado,web territorio,email
MAD,reas_mad.png,mercado_mad.png,https://mad.example,mad@example.org
CAT,reas_cat.png,mercado_cat.png,https://cat.example,cat@example.org
";

/// A wide table in the production shape: identity rows then `properties`
/// numeric and boolean rows, `entities` columns alternating territories.
fn wide_dataset(entities: usize, properties: usize) -> String {
    let territories = ["MAD", "CAT"];
    let mut csv = String::from("id,Codigo Territorio,tipo,notas");
    for i in 0..entities {
        let _ = write!(csv, ",{}.{}", territories[i % 2], i);
    }
    csv.push('\n');

    let mut row = |name: &str, value: &dyn Fn(usize) -> String| {
        let _ = write!(csv, "0,{name},t,");
        for i in 0..entities {
            let _ = write!(csv, ",\"{}\"", value(i));
        }
        csv.push('\n');
    };
    row("NIF", &|i| format!("B{i:08}"));
    row("Nombre", &|i| format!("Entidad {i}"));
    row("Idioma", &|_| "cas;cat".to_string());
    for p in 0..properties {
        if p % 4 == 0 {
            row(&format!("ind58_{p}"), &|i| if i % 2 == 0 { "Si" } else { "No" }.to_string());
        } else {
            row(&format!("ind3d_{p}"), &|i| format!("{}.{:03},50 €", i + p, (i * 37) % 1000));
        }
    }
    csv
}

fn property_table(properties: usize) -> PropertyTable {
    let integer: Vec<String> = (0..properties)
        .filter(|p| p % 4 != 0)
        .map(|p| format!("ind3d_{p}"))
        .collect();
    let boolean: Vec<String> = (0..properties)
        .filter(|p| p % 4 == 0)
        .map(|p| format!("ind58_{p}"))
        .collect();
    PropertyTable::from_lists(&integer, &[], &boolean)
}

fn bench_parse(c: &mut Criterion) {
    let territories =
        TerritoryTable::from_reader(TERRITORIES.as_bytes()).expect("territory fixture");
    let mut group = c.benchmark_group("dataset_parse");

    for entities in [10, 100, 500] {
        let csv = wide_dataset(entities, 120);
        let parser = DatasetParser::new(property_table(120));
        group.throughput(Throughput::Elements(entities as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entities), &csv, |b, csv| {
            b.iter(|| {
                let records = parser
                    .parse_reader(black_box(csv.as_bytes()), &territories)
                    .expect("dataset parses");
                black_box(records)
            })
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let inputs = ["950", "12000", "1.234.567,00 €", "N/D", "-1500"];
    c.bench_function("format_number", |b| {
        b.iter(|| {
            for raw in inputs {
                black_box(format_number(black_box(raw), NumberKind::Integer));
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_format);
criterion_main!(benches);
