//! End-to-end runs of the benchmark battery over tiny sources.

use std::path::Path;

use arrow::datatypes::DataType;

use filebench::bench::{
    BenchMode, Benchmarker, DatasetSpec, Frame, HarnessConfig, READ_CASES, Representation,
    WRITE_CASES, read_table, run_benchmarks,
};
use filebench::run_cmd;
use filebench::storage::csv::read_timings;

fn write_source(dir: &Path) -> DatasetSpec {
    std::fs::write(
        dir.join("tiny.csv"),
        "id,name,value\n1,alpha,0.5\n2,beta,1.5\n3,gamma,2.5\n",
    )
    .unwrap();
    DatasetSpec::new("tiny", "tiny", "tiny.csv", ',', true)
}

fn artifact_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.ends_with(".parquet") || name.ends_with(".feather")
        })
        .count()
}

#[test]
fn test_writes_produce_ten_artifacts_and_reads_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_source(dir.path());
    let benchmarker = Benchmarker::new(&dataset, dir.path(), 1)
        .unwrap()
        .with_iterations(1, 1);

    let writes = benchmarker.run_writes().expect("writes");
    assert_eq!(writes.len(), WRITE_CASES.len());
    assert_eq!(artifact_count(dir.path()), 10);

    let reads = benchmarker.run_reads().expect("reads");
    assert_eq!(reads.len(), READ_CASES.len());
    for timing in writes.iter().chain(&reads) {
        assert!(timing.mean >= 0.0, "{timing:?}");
    }

    // Labels come out in declaration order
    assert_eq!(writes[0].expr, "parquet (UNC)");
    assert_eq!(writes[0].output_type, "arrow Table");
    assert_eq!(reads[4].expr, "feather V2 (UNC)");
    assert_eq!(reads[4].output_type, "pandas");
}

#[test]
fn test_round_trip_preserves_shape() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_source(dir.path());
    Benchmarker::new(&dataset, dir.path(), 2)
        .unwrap()
        .with_iterations(1, 1)
        .run_writes()
        .unwrap();

    for case in WRITE_CASES {
        let path = case.artifact_path(dir.path(), &dataset.base);
        let table = read_table(&path, case.storage).unwrap();
        assert_eq!(table.num_rows(), 3, "{}", path.display());
        assert_eq!(table.num_columns(), 3, "{}", path.display());

        if case.representation == Representation::DataFrame {
            let frame = Frame::from_batch(&table).unwrap();
            assert_eq!(frame.num_rows(), 3);
            assert_eq!(frame.column_names(), vec!["id", "name", "value"]);
        }
    }
}

#[test]
fn test_headerless_pipe_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("loans.csv"), "100|A|3.75\n101|B|4.0\n").unwrap();
    let dataset = DatasetSpec::new("loans", "loans", "loans.csv", '|', false);

    let benchmarker = Benchmarker::new(&dataset, dir.path(), 1)
        .unwrap()
        .with_iterations(1, 1);
    benchmarker.run_writes().unwrap();
    benchmarker.run_reads().unwrap();

    let case = WRITE_CASES[0];
    let table = read_table(&case.artifact_path(dir.path(), "loans"), case.storage).unwrap();
    let schema = table.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["f0", "f1", "f2"]);
}

#[test]
fn test_date_columns_keep_their_type_in_both_representations() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("trips.csv"),
        "id,day\n1,2010-01-26\n2,2010-01-27\n3,2010-01-28\n",
    )
    .unwrap();
    let dataset = DatasetSpec::new("trips", "trips", "trips.csv", ',', true);
    Benchmarker::new(&dataset, dir.path(), 1)
        .unwrap()
        .with_iterations(1, 1)
        .run_writes()
        .unwrap();

    let table_case = WRITE_CASES[0];
    let frame_case = WRITE_CASES[1];
    assert_eq!(frame_case.representation, Representation::DataFrame);
    let table = read_table(&table_case.artifact_path(dir.path(), "trips"), table_case.storage).unwrap();
    let frame = read_table(&frame_case.artifact_path(dir.path(), "trips"), frame_case.storage).unwrap();

    assert_eq!(table.schema().field(1).data_type(), &DataType::Date32);
    assert_eq!(frame.schema().field(1).data_type(), &DataType::Date32);
    assert_eq!(table.column(1), frame.column(1));
}

#[test]
fn test_reads_without_writes_fail() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_source(dir.path());
    let benchmarker = Benchmarker::new(&dataset, dir.path(), 1).unwrap();
    assert!(benchmarker.run_reads().is_err());
}

#[test]
fn test_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = DatasetSpec::new("ghost", "ghost", "ghost.csv", ',', true);
    let benchmarker = Benchmarker::new(&dataset, dir.path(), 1).unwrap();
    assert!(benchmarker.run_writes().is_err());
}

#[test]
fn test_run_benchmarks_tags_rows_by_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let tiny = write_source(dir.path());
    let mut other = tiny.clone();
    other.name = "tiny_copy".to_string();
    other.base = "tiny_copy".to_string();

    let config = HarnessConfig {
        datasets: vec![tiny, other],
        thread_counts: vec![1],
        read_iterations: 1,
        write_iterations: 1,
    };

    let writes = run_benchmarks(&config, dir.path(), 1, BenchMode::Write).unwrap();
    assert_eq!(writes.len(), 20);
    assert!(writes[..10].iter().all(|r| r.dataset == "tiny"));
    assert!(writes[10..].iter().all(|r| r.dataset == "tiny_copy"));

    let reads = run_benchmarks(&config, dir.path(), 1, BenchMode::Read).unwrap();
    assert_eq!(reads.len(), 20);
}

#[test]
fn test_driver_writes_one_table_per_mode_and_thread_count() {
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig {
        datasets: vec![write_source(dir.path())],
        thread_counts: vec![1, 2],
        read_iterations: 1,
        write_iterations: 1,
    };

    let written = run_cmd::run(&config, dir.path()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "py_write_results_1.csv",
            "py_read_results_1.csv",
            "py_write_results_2.csv",
            "py_read_results_2.csv",
        ]
    );

    for path in &written {
        let rows = read_timings(path).unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.dataset == "tiny"));
    }

    let header = std::fs::read_to_string(&written[0]).unwrap();
    assert!(header.starts_with("expr,output_type,mean,dataset\n"));
}
