// Integration tests for the tabular import format

use std::path::PathBuf;

use safetty::engine::session::Simulation;
use safetty::engine::stepper::run_to_completion;
use safetty::import::table::parse_table;
use safetty::import::{load_table, ImportError};
use safetty::model::scenario::Scenario;
use safetty::tree::ExploreOptions;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_classic_demo_matches_builtin() {
    let scenario = load_table(&demo("classic.csv")).expect("classic.csv should load");
    assert_eq!(scenario, Scenario::classic());

    let sim = Simulation::new(scenario, ExploreOptions::default()).expect("classic.csv is valid");
    let result = run_to_completion(sim.initial_state());
    assert_eq!(result.safe_sequence, vec![1, 3, 4, 0, 2]);
}

#[test]
fn test_unsafe_demo_runs_to_unsafe() {
    let scenario = load_table(&demo("unsafe.csv")).expect("unsafe.csv should load");
    assert_eq!(scenario.available, vec![0, 0]);
    assert_eq!(scenario.processes.len(), 3);

    let sim = Simulation::new(scenario, ExploreOptions::default()).expect("unsafe.csv is valid");
    let result = run_to_completion(sim.initial_state());
    assert!(result.is_complete);
    assert!(!result.is_safe);
    assert!(sim.tree().safe_sequences().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_table(&demo("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}

#[test]
fn test_available_only_from_first_row() {
    let source = "\
Process,Allocation_A,Max_A,Available_A,Need_A
P0,1,2,4,1
P1,0,3,9,3
";
    let scenario = parse_table(source).unwrap();
    assert_eq!(scenario.available, vec![4]);
    assert_eq!(scenario.processes[1].need(), &[3]);
}

#[test]
fn test_quoted_and_padded_cells() {
    let source = "\
\"Process\", \"Allocation_A\" ,\"Max_A\",\"Available_A\",\"Need_A\"
\"P0\", \"1\" , 2 ,\"3\",\"1\"
";
    let scenario = parse_table(source).unwrap();
    assert_eq!(scenario.processes[0].allocation(), &[1]);
    assert_eq!(scenario.available, vec![3]);
}

#[test]
fn test_short_row_reports_line() {
    let source = "\
Process,Allocation_A,Max_A,Available_A,Need_A

P0,1,2
";
    assert_eq!(
        parse_table(source),
        Err(ImportError::ShortRow {
            line: 3,
            expected: 5,
            got: 3
        })
    );
}

#[test]
fn test_need_column_is_kept_for_validation() {
    let source = "\
Process,Allocation_A,Max_A,Available_A,Need_A
P0,1,3,2,1
";
    let scenario = parse_table(source).unwrap();
    assert_eq!(scenario.processes[0].need(), &[1]);
    assert!(scenario.validate().is_err());
}

#[test]
fn test_blank_rows_renumber_ids() {
    let source = "\
Process,Allocation_A,Max_A,Available_A,Need_A
P0,0,0,5,0
P1,-,-,-,-
P2,1,2,-,1
";
    let scenario = parse_table(source).unwrap();
    assert_eq!(scenario.available, vec![5]);
    assert_eq!(scenario.processes.len(), 1);
    assert_eq!(scenario.processes[0].id(), 0);
    assert_eq!(scenario.processes[0].name(), "P0");
}

#[test]
fn test_resource_grouped_header_is_not_misread() {
    let source = "\
Process,Allocation_A,Max_A,Available_A,Need_A,Allocation_B,Max_B,Available_B,Need_B
P0,1,2,5,1,0,3,6,3
";
    assert!(matches!(
        parse_table(source),
        Err(ImportError::MisplacedColumn { column: 3, .. })
    ));
}

#[test]
fn test_unlabelled_header_has_no_resources() {
    let source = "Process,X,Y,Z,W\nP0,1,2,3,4\n";
    assert_eq!(parse_table(source), Err(ImportError::NoResources));
}
