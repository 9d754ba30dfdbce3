use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gitolite_core::{Model, parse};
use std::fmt::Write;
use std::hint::black_box;

/// An admin config followed by `projects` project blocks of `width` repos each.
fn synthetic_config(projects: usize, width: usize) -> String {
    let mut text = String::from("@admins = alice bob\n");
    for p in 0..projects {
        let repos: Vec<String> = (0..width).map(|r| format!("p{p}-r{r}")).collect();
        writeln!(text, "@proj{p} = {}", repos.join(" ")).unwrap();
    }
    text.push_str("repo gitolite-admin\n    RW+ = @admins\n");
    for p in 0..projects {
        writeln!(text, "    RW = lead{p}").unwrap();
        writeln!(text, "    RW VREF/NAME/conf/subs/proj{p} = lead{p}").unwrap();
        writeln!(text, "    - VREF/NAME/ = lead{p}").unwrap();
    }
    for p in 0..projects {
        writeln!(text, "\n# project {p}\nrepo @proj{p}").unwrap();
        writeln!(text, "    desc = project number {p}").unwrap();
        writeln!(text, "    RW+ master = lead{p} # lead").unwrap();
        writeln!(text, "    RW dev/ = @admins dev{p}").unwrap();
        writeln!(text, "    R = @all").unwrap();
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(40);

    for projects in [1usize, 10, 100] {
        let text = synthetic_config(projects, 8);
        group.bench_with_input(BenchmarkId::from_parameter(projects), &text, |b, t| {
            b.iter(|| {
                let model = parse(black_box(t)).expect("benchmark configs are valid");
                black_box(model.config_count());
            });
        });
    }

    group.finish();
}

fn benchmark_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("print");
    group.sample_size(40);

    for projects in [1usize, 10, 100] {
        let model: Model = parse(&synthetic_config(projects, 8)).expect("benchmark configs are valid");
        group.bench_with_input(BenchmarkId::from_parameter(projects), &model, |b, m| {
            b.iter(|| black_box(m.print().len()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_print);
criterion_main!(benches);
