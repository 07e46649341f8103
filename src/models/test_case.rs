//! Test case run model

use serde::{Deserialize, Serialize};

use crate::constants::RESULT_CORRECT;

/// A test case together with the result of its (first) judging run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestcaseRun {
    /// Rank of the test case within the problem
    pub rank: u32,
    pub description: Option<String>,
    /// Run result (`correct`, `wrong-answer`, ...) if the run finished
    #[serde(default)]
    pub result: Option<String>,
    /// Runtime in seconds
    #[serde(default)]
    pub runtime: Option<f64>,
}

impl TestcaseRun {
    pub fn is_correct(&self) -> bool {
        self.result.as_deref() == Some(RESULT_CORRECT)
    }

    pub fn is_judged(&self) -> bool {
        self.result.is_some()
    }
}
