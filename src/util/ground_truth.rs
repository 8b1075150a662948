//! loads and holds ground truth from a ground truth file

use std::path::Path;

use crate::data_handling::results::{Id, ResultMatrix};
use crate::error::ParseError;


/// True neighbors per query. Ground truth files share the results file format;
/// only the first column (the nearest neighbor) is used for recall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    neighbors: ResultMatrix,
}

impl GroundTruth {
    /// Reads a ground truth file.
    pub fn read(gt_filename: &Path) -> Result<GroundTruth, ParseError> {
        Ok(GroundTruth::new(ResultMatrix::read(gt_filename)?))
    }

    pub fn new(neighbors: ResultMatrix) -> GroundTruth {
        GroundTruth { neighbors }
    }

    /// number of queries
    pub fn n(&self) -> usize {
        self.neighbors.num_queries()
    }

    /// number of neighbors listed per query
    pub fn k(&self) -> usize {
        self.neighbors.num_ranks()
    }

    /// returns the true nearest neighbor of a query
    pub fn nearest(&self, q: usize) -> Option<Id> {
        self.neighbors.get(q, 0)
    }

    pub fn neighbors(&self) -> &ResultMatrix {
        &self.neighbors
    }
}

impl From<ResultMatrix> for GroundTruth {
    fn from(neighbors: ResultMatrix) -> Self {
        GroundTruth::new(neighbors)
    }
}
