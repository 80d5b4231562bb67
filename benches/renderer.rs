use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use galaxy_svg::config::parse_config;
use galaxy_svg::{Config, Template, deterministic_random, render_template, spiral_points};
use std::hint::black_box;

fn profile_source(arms: usize, items_per_arm: usize, projects: usize) -> String {
    let mut out = String::from("{ username: \"bench\", galaxy_arms: [");
    for arm in 0..arms {
        out.push_str(&format!("{{ name: \"Arm {arm}\", items: ["));
        for item in 0..items_per_arm {
            out.push_str(&format!("\"item-{arm}-{item}\","));
        }
        out.push_str("] },");
    }
    out.push_str("], projects: [");
    for idx in 0..projects {
        out.push_str(&format!(
            "{{ repo: \"bench/project-{idx}\", description: \"benchmark project number {idx} with a description\", arm: {idx} }},"
        ));
    }
    out.push_str(
        "], stats: { commits: 12345, stars: 678, prs: 90, issues: 12, repos: 34 }, languages: {",
    );
    for (idx, name) in ["Rust", "Go", "Python", "TypeScript", "C", "Zig", "Lua", "Shell"]
        .iter()
        .enumerate()
    {
        out.push_str(&format!("{name}: {},", (idx + 1) * 1000));
    }
    out.push_str("} }");
    out
}

fn fixture(name: &str) -> Config {
    let source = match name {
        "small" => profile_source(3, 3, 2),
        "medium" => profile_source(3, 6, 6),
        _ => profile_source(8, 12, 16),
    };
    parse_config(&source).expect("bench profile should parse")
}

fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for name in ["small", "medium", "large"] {
        let config = fixture(name);
        for template in Template::ALL {
            group.bench_with_input(
                BenchmarkId::new(template.name(), name),
                &config,
                |b, data| b.iter(|| render_template(black_box(template), black_box(data))),
            );
        }
    }
    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    for count in [30usize, 300, 3000] {
        group.bench_with_input(BenchmarkId::new("spiral_points", count), &count, |b, &n| {
            b.iter(|| spiral_points(black_box((425.0, 215.0)), 25.0, n, 180.0, 0.85, 1.65, 0.52))
        });
        group.bench_with_input(BenchmarkId::new("deterministic_random", count), &count, |b, &n| {
            b.iter(|| deterministic_random(black_box("bench_sx_bg"), n, 20.0, 830.0))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_templates, bench_geometry);
criterion_main!(benches);
