use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mirror_core::{NullSink, run_once};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 10 directories of 50 small files each.
fn populate(root: &Path) {
    for d in 0..10 {
        let dir = root.join(format!("dir_{d:02}"));
        fs::create_dir(&dir).unwrap();
        for f in 0..50 {
            fs::write(dir.join(format!("file_{f:02}.txt")), format!("{d}-{f}")).unwrap();
        }
    }
}

fn pass_benchmark(c: &mut Criterion) {
    c.bench_function("run_once (500 files, already mirrored)", |b| {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();
        populate(source.path());
        assert!(run_once(source.path(), replica.path(), &mut NullSink).success());

        b.iter(|| {
            let result = run_once(black_box(source.path()), black_box(replica.path()), &mut NullSink);
            assert!(result.is_noop());
        })
    });

    c.bench_function("run_once (500 files, empty replica)", |b| {
        let source = tempdir().unwrap();
        populate(source.path());

        b.iter_with_setup(
            || tempdir().unwrap(),
            |replica| {
                let result = run_once(source.path(), replica.path(), &mut NullSink);
                assert_eq!(result.counts.copied, 500);
            },
        )
    });
}

criterion_group!(benches, pass_benchmark);
criterion_main!(benches);
