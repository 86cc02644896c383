//! Tests covering CSV and Parquet export of pipeline outputs.

use std::fs;

use arrow_array::{Array, RecordBatch, StringArray, UInt32Array};
use bytes::Bytes;
use cotrack_core::{PipelineBuilder, PipelineOutput, PlaylistCorpus};
use cotrack_providers_tabular::{
    EdgeRow, NodeRow, TableFormat, edge_rows, export_tables, forest_rows, node_rows,
    write_edges_parquet, write_nodes_parquet,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rstest::{fixture, rstest};

#[fixture]
fn output() -> PipelineOutput {
    let corpus = PlaylistCorpus::from_names(
        "export",
        &[&["A", "B", "C"], &["A", "B"], &["A", "C"], &["Hello, \"World\""]],
    );
    PipelineBuilder::new()
        .build()
        .expect("defaults valid")
        .run(&corpus)
        .expect("run must succeed")
}

fn read_batches(bytes: Vec<u8>) -> Vec<RecordBatch> {
    ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes))
        .expect("valid parquet")
        .build()
        .expect("reader")
        .collect::<Result<Vec<_>, _>>()
        .expect("batches")
}

fn u32_column(batch: &RecordBatch, name: &str) -> Vec<u32> {
    batch
        .column_by_name(name)
        .and_then(|column| column.as_any().downcast_ref::<UInt32Array>())
        .expect("UInt32 column")
        .values()
        .to_vec()
}

fn str_column(batch: &RecordBatch, name: &str) -> Vec<String> {
    let column = batch
        .column_by_name(name)
        .and_then(|column| column.as_any().downcast_ref::<StringArray>())
        .expect("Utf8 column");
    (0..column.len()).map(|row| column.value(row).to_owned()).collect()
}

#[rstest]
fn rows_cover_isolated_nodes_and_forest_order(output: PipelineOutput) {
    let nodes = node_rows(output.graph());
    assert_eq!(nodes.len(), 4);
    assert_eq!(
        nodes[3],
        NodeRow {
            id: 3,
            label: "Hello, \"World\"".into(),
        }
    );

    let edges = edge_rows(output.graph());
    assert_eq!(edges.len(), 3);
    assert_eq!(
        edges[2],
        EdgeRow {
            source: 1,
            target: 2,
            weight: 1,
            label: "1".into(),
        }
    );

    let forest: Vec<_> = forest_rows(output.forest())
        .into_iter()
        .map(|row| (row.source, row.target, row.weight))
        .collect();
    assert_eq!(forest, vec![(0, 1, 2), (0, 2, 2)]);
}

#[rstest]
fn csv_export_writes_three_tables(output: PipelineOutput) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out_dir = dir.path().join("tables");
    let tables = export_tables(&out_dir, TableFormat::Csv, output.graph(), output.forest())
        .expect("export must succeed");

    assert_eq!(tables.nodes(), out_dir.join("nodes.csv"));
    let nodes = fs::read_to_string(tables.nodes()).expect("read nodes");
    assert_eq!(
        nodes,
        "id,label\r\n0,A\r\n1,B\r\n2,C\r\n3,\"Hello, \"\"World\"\"\"\r\n"
    );
    let edges = fs::read_to_string(tables.edges()).expect("read edges");
    assert_eq!(
        edges,
        "source,target,weight,label\r\n0,1,2,2\r\n0,2,2,2\r\n1,2,1,1\r\n"
    );
    let forest = fs::read_to_string(tables.forest()).expect("read forest");
    assert_eq!(forest, "source,target,weight,label\r\n0,1,2,2\r\n0,2,2,2\r\n");
}

#[rstest]
fn parquet_export_round_trips_columns(output: PipelineOutput) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let tables = export_tables(dir.path(), TableFormat::Parquet, output.graph(), output.forest())
        .expect("export must succeed");
    assert!(tables.forest().ends_with("forest.parquet"));

    let batches = read_batches(fs::read(tables.edges()).expect("read edges"));
    assert_eq!(batches.len(), 1);
    assert_eq!(u32_column(&batches[0], "source"), vec![0, 0, 1]);
    assert_eq!(u32_column(&batches[0], "target"), vec![1, 2, 2]);
    assert_eq!(u32_column(&batches[0], "weight"), vec![2, 2, 1]);
    assert_eq!(str_column(&batches[0], "label"), vec!["2", "2", "1"]);
}

#[rstest]
fn parquet_node_table_keeps_labels_verbatim(output: PipelineOutput) {
    let mut buffer = Vec::new();
    write_nodes_parquet(&mut buffer, &node_rows(output.graph())).expect("write nodes");
    let batches = read_batches(buffer);
    assert_eq!(u32_column(&batches[0], "id"), vec![0, 1, 2, 3]);
    assert_eq!(
        str_column(&batches[0], "label"),
        vec!["A", "B", "C", "Hello, \"World\""]
    );
}

#[rstest]
fn empty_tables_are_valid_parquet() {
    let mut buffer = Vec::new();
    write_edges_parquet(&mut buffer, &[]).expect("write empty edges");
    let total: usize = read_batches(buffer).iter().map(RecordBatch::num_rows).sum();
    assert_eq!(total, 0);
}

#[rstest]
fn export_reports_io_failures(output: PipelineOutput) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").expect("write blocker");
    let err = export_tables(&blocker, TableFormat::Csv, output.graph(), output.forest())
        .expect_err("file in place of directory must fail");
    assert_eq!(err.code().as_str(), "TABULAR_EXPORT_IO");
}
