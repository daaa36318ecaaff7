// Input bundle handed to the validator and the engine

use super::process::Process;
use super::ResourceVec;
use crate::engine::errors::ConfigError;
use crate::engine::validate::validate;

/// A process list plus the available vector, as produced by an input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub processes: Vec<Process>,
    pub available: ResourceVec,
}

impl Scenario {
    pub fn new(processes: Vec<Process>, available: ResourceVec) -> Self {
        Scenario {
            processes,
            available,
        }
    }

    /// The classic 5-process / 3-resource example
    pub fn classic() -> Self {
        let allocation = [[0, 1, 0], [2, 0, 0], [3, 0, 2], [2, 1, 1], [0, 0, 2]];
        let max = [[7, 5, 3], [3, 2, 2], [9, 0, 2], [2, 2, 2], [4, 3, 3]];

        let processes = allocation
            .iter()
            .zip(max.iter())
            .enumerate()
            .map(|(id, (a, m))| Process::numbered(id, a.to_vec(), m.to_vec()))
            .collect();

        Scenario::new(processes, vec![3, 3, 2])
    }

    pub fn resource_count(&self) -> usize {
        self.available.len()
    }

    /// Rows indexed by process, columns by resource type
    pub fn allocation_matrix(&self) -> Vec<ResourceVec> {
        self.processes
            .iter()
            .map(|p| p.allocation().to_vec())
            .collect()
    }

    pub fn max_matrix(&self) -> Vec<ResourceVec> {
        self.processes.iter().map(|p| p.max().to_vec()).collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(&self.processes, &self.available)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::classic()
    }
}
