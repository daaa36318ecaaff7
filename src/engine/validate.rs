//! Configuration validator
//!
//! Checks a candidate process list and available vector for internal
//! consistency before a run. Checks run in a fixed order and stop at the
//! first failure:
//!
//! 1. No `available` entry is negative
//! 2. `Σ allocation[k] <= total[k]` where `total = available + Σ allocation`
//! 3. No process declares `max[k] > total[k]`
//! 4. `need[k] == max[k] - allocation[k]` for every process
//!
//! A shape check (matching vector lengths, at least one process and resource)
//! runs first, and a non-negativity check on `allocation`, `max`, and `need`
//! runs last, so a `max` below `allocation` is rejected.

use super::errors::ConfigError;
use crate::model::column_totals;
use crate::model::process::Process;

/// Validate a configuration without mutating it
pub fn validate(processes: &[Process], available: &[i64]) -> Result<(), ConfigError> {
    check_shape(processes, available)?;

    if let Some((resource, &value)) = available.iter().enumerate().find(|(_, &v)| v < 0) {
        return Err(ConfigError::NegativeAvailable { resource, value });
    }

    let total = column_totals(available, processes.iter().map(|p| p.allocation()));

    for (resource, &total_k) in total.iter().enumerate() {
        let allocated: i64 = processes.iter().map(|p| p.allocation()[resource]).sum();
        if allocated > total_k {
            return Err(ConfigError::OverAllocated {
                resource,
                allocated,
                total: total_k,
            });
        }
    }

    for process in processes {
        for (resource, (&max, &total_k)) in process.max().iter().zip(&total).enumerate() {
            if max > total_k {
                return Err(ConfigError::MaxExceedsTotal {
                    process: process.name().to_string(),
                    resource,
                    max,
                    total: total_k,
                });
            }
        }
    }

    for process in processes {
        for resource in 0..process.resource_count() {
            let expected = process.max()[resource] - process.allocation()[resource];
            let need = process.need()[resource];
            if need != expected {
                return Err(ConfigError::NeedMismatch {
                    process: process.name().to_string(),
                    resource,
                    need,
                    expected,
                });
            }
        }
    }

    for process in processes {
        for (vector, values) in [
            ("allocation", process.allocation()),
            ("max", process.max()),
            ("need", process.need()),
        ] {
            if let Some(resource) = values.iter().position(|&v| v < 0) {
                return Err(ConfigError::NegativeEntry {
                    process: process.name().to_string(),
                    vector,
                    resource,
                });
            }
        }
    }

    Ok(())
}

fn check_shape(processes: &[Process], available: &[i64]) -> Result<(), ConfigError> {
    if processes.is_empty() || available.is_empty() {
        return Err(ConfigError::Empty);
    }

    let expected = available.len();
    for process in processes {
        for (vector, len) in [
            ("allocation", process.allocation().len()),
            ("max", process.max().len()),
            ("need", process.need().len()),
        ] {
            if len != expected {
                return Err(ConfigError::DimensionMismatch {
                    process: process.name().to_string(),
                    vector,
                    expected,
                    got: len,
                });
            }
        }
    }
    Ok(())
}
