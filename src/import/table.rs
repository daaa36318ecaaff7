//! Tabular (CSV) scenario import
//!
//! # Format
//!
//! The header row names, for every resource label `L`, the four columns
//! `Allocation_L`, `Max_L`, `Available_L`, and `Need_L`, after a leading
//! process-label column. Labels are discovered from the `Allocation_*`
//! columns; a table missing any sibling column is rejected. The columns must
//! appear block by block in that order, with resources in the same order in
//! every block; any other arrangement is rejected rather than misread.
//!
//! ```text
//! Process,Allocation_A,Allocation_B,Max_A,Max_B,Available_A,Available_B,Need_A,Need_B
//! P0,0,1,7,5,3,3,7,4
//! P1,2,0,3,2,-,-,1,2
//! ```
//!
//! With `R = (header_count - 1) / 4` resource types, cells are read by
//! position: allocation `[1, 1+R)`, max `[1+R, 1+2R)`, available
//! `[1+2R, 1+3R)`, need `[1+3R, 1+4R)`. The available vector comes from the
//! first data row only. A `-` cell reads as 0. Rows whose allocation, max, and
//! need are all zero are dropped; kept rows are numbered `P0`, `P1`, ... in
//! order.

use super::ImportError;
use crate::model::process::Process;
use crate::model::scenario::Scenario;
use crate::model::ResourceVec;

const ALLOCATION_PREFIX: &str = "Allocation_";
const SIBLING_PREFIXES: [&str; 3] = ["Max_", "Available_", "Need_"];
const BLOCK_PREFIXES: [&str; 4] = [ALLOCATION_PREFIX, "Max_", "Available_", "Need_"];

/// Parse a table into an (unvalidated) scenario
pub fn parse_table(source: &str) -> Result<Scenario, ImportError> {
    let mut lines = source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(ImportError::MissingHeader)?;
    let headers = split_row(header_line);
    check_columns(&headers)?;
    let resource_count = check_layout(&headers)?;

    let mut available: Option<ResourceVec> = None;
    let mut processes = Vec::new();

    for (line_index, line) in lines {
        let row = split_row(line);
        let line_no = line_index + 1;
        if row.len() < 1 + 4 * resource_count {
            return Err(ImportError::ShortRow {
                line: line_no,
                expected: 1 + 4 * resource_count,
                got: row.len(),
            });
        }

        let section = |block: usize| -> Result<ResourceVec, ImportError> {
            let start = 1 + block * resource_count;
            (start..start + resource_count)
                .map(|col| parse_cell(&row[col], line_no, &headers[col]))
                .collect()
        };

        if available.is_none() {
            available = Some(section(2)?);
        }

        let process = Process::imported(processes.len(), section(0)?, section(1)?, section(3)?);
        if !process.is_blank() {
            processes.push(process);
        }
    }

    let available = available.ok_or(ImportError::NoData)?;
    Ok(Scenario::new(processes, available))
}

/// Every `Allocation_L` label must have `Max_L`, `Available_L`, and `Need_L`
fn check_columns(headers: &[String]) -> Result<(), ImportError> {
    for label in headers.iter().filter_map(|h| h.strip_prefix(ALLOCATION_PREFIX)) {
        for prefix in SIBLING_PREFIXES {
            let column = format!("{}{}", prefix, label);
            if !headers.iter().any(|h| *h == column) {
                return Err(ImportError::MissingColumn { column });
            }
        }
    }
    Ok(())
}

/// Columns must form four blocks of `R` with matching label order; returns `R`
fn check_layout(headers: &[String]) -> Result<usize, ImportError> {
    let labels: Vec<&str> = headers
        .iter()
        .filter_map(|h| h.strip_prefix(ALLOCATION_PREFIX))
        .collect();
    if labels.is_empty() {
        return Err(ImportError::NoResources);
    }

    let resource_count = labels.len();
    if headers.len() != 1 + 4 * resource_count {
        return Err(ImportError::ColumnCount {
            expected: 1 + 4 * resource_count,
            got: headers.len(),
        });
    }

    for (block, prefix) in BLOCK_PREFIXES.iter().enumerate() {
        for (k, label) in labels.iter().enumerate() {
            let index = 1 + block * resource_count + k;
            let expected = format!("{}{}", prefix, label);
            if headers[index] != expected {
                return Err(ImportError::MisplacedColumn {
                    column: index + 1,
                    expected,
                    found: headers[index].clone(),
                });
            }
        }
    }
    Ok(resource_count)
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim().to_string())
        .collect()
}

fn parse_cell(cell: &str, line: usize, column: &str) -> Result<i64, ImportError> {
    if cell == "-" {
        return Ok(0);
    }
    cell.parse::<i64>().map_err(|_| ImportError::InvalidCell {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Process,Allocation_A,Allocation_B,Max_A,Max_B,Available_A,Available_B,Need_A,Need_B";

    #[test]
    fn test_parse_two_resources() {
        let source = format!("{}\nP0,0,1,7,5,3,3,7,4\nP1,2,0,3,2,-,-,1,2\n", HEADER);
        let scenario = parse_table(&source).unwrap();

        assert_eq!(scenario.available, vec![3, 3]);
        assert_eq!(scenario.processes.len(), 2);
        assert_eq!(scenario.processes[1].allocation(), &[2, 0]);
        assert_eq!(scenario.processes[1].max(), &[3, 2]);
        assert_eq!(scenario.processes[1].need(), &[1, 2]);
    }

    #[test]
    fn test_missing_sibling_column() {
        let source = "Process,Allocation_A,Max_A,Available_A,Needs_A\nP0,1,1,1,0\n";
        assert_eq!(
            parse_table(source),
            Err(ImportError::MissingColumn {
                column: "Need_A".to_string()
            })
        );
    }

    #[test]
    fn test_dash_reads_as_zero_and_blank_rows_dropped() {
        let source = format!("{}\nP0,-,-,-,-,2,2,-,-\nP1,1,0,1,1,-,-,0,1\n", HEADER);
        let scenario = parse_table(&source).unwrap();

        assert_eq!(scenario.available, vec![2, 2]);
        assert_eq!(scenario.processes.len(), 1);
        assert_eq!(scenario.processes[0].id(), 0);
        assert_eq!(scenario.processes[0].name(), "P0");
        assert_eq!(scenario.processes[0].need(), &[0, 1]);
    }

    #[test]
    fn test_invalid_cell_is_not_coerced() {
        let source = format!("{}\nP0,x,1,7,5,3,3,7,4\n", HEADER);
        assert_eq!(
            parse_table(&source),
            Err(ImportError::InvalidCell {
                line: 2,
                column: "Allocation_A".to_string(),
                value: "x".to_string()
            })
        );
    }

    #[test]
    fn test_columns_grouped_by_resource_rejected() {
        let source = "Process,Allocation_A,Max_A,Available_A,Need_A,Allocation_B,Max_B,Available_B,Need_B\nP0,1,2,5,1,0,3,6,3\n";
        assert_eq!(
            parse_table(source),
            Err(ImportError::MisplacedColumn {
                column: 3,
                expected: "Allocation_B".to_string(),
                found: "Max_A".to_string()
            })
        );
    }

    #[test]
    fn test_header_without_allocation_columns_rejected() {
        assert_eq!(
            parse_table("Process,X,Y,Z,W\nP0,1,2,3,4\n"),
            Err(ImportError::NoResources)
        );
    }

    #[test]
    fn test_extra_header_column_rejected() {
        let source = format!("{},Notes\nP0,0,1,7,5,3,3,7,4,x\n", HEADER);
        assert_eq!(
            parse_table(&source),
            Err(ImportError::ColumnCount {
                expected: 9,
                got: 10
            })
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(parse_table(""), Err(ImportError::MissingHeader));
        assert_eq!(parse_table(HEADER), Err(ImportError::NoData));
    }
}
