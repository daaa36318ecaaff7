// Command-line scenario input: `--available 3,3,2 --process 0,1,0:7,5,3 ...`

use super::ImportError;
use crate::model::process::Process;
use crate::model::scenario::Scenario;
use crate::model::ResourceVec;
use std::str::FromStr;

/// One `ALLOCATION:MAX` process argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessArg {
    pub allocation: ResourceVec,
    pub max: ResourceVec,
}

impl FromStr for ProcessArg {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (allocation, max) = s.split_once(':').ok_or_else(|| ImportError::InvalidArgument {
            value: s.to_string(),
            reason: "expected ALLOCATION:MAX, e.g. 0,1,0:7,5,3".to_string(),
        })?;

        Ok(ProcessArg {
            allocation: parse_vector(allocation)?,
            max: parse_vector(max)?,
        })
    }
}

/// Parse a comma-separated integer vector
pub fn parse_vector(s: &str) -> Result<ResourceVec, ImportError> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>().map_err(|_| ImportError::InvalidArgument {
                value: s.to_string(),
                reason: format!("'{}' is not an integer", part),
            })
        })
        .collect()
}

/// Build a scenario from parsed arguments; processes are numbered in order
pub fn scenario_from_args(available: ResourceVec, processes: &[ProcessArg]) -> Scenario {
    let processes = processes
        .iter()
        .enumerate()
        .map(|(id, p)| Process::numbered(id, p.allocation.clone(), p.max.clone()))
        .collect();
    Scenario::new(processes, available)
}
