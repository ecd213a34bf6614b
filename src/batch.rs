// Copyright (c) 2025 Dasql Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! One statement executed against many parameter sets in a single round trip.

use crate::args::{convert_args, NamedArg, SqlParameter};
use crate::error::ArgError;

/// A batch of parameter sets for a single SQL statement.
///
/// Exec sets and query sets are appended independently. On submission every
/// set is marshalled up front; the combined order is all exec sets in append
/// order followed by all query sets in append order, and the service's
/// per-set outcomes come back in that same order.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    sql: String,
    exec_sets: Vec<Vec<NamedArg>>,
    query_sets: Vec<Vec<NamedArg>>,
}

impl Batch {
    /// Creates a new batch for the provided SQL statement.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            exec_sets: Vec::new(),
            query_sets: Vec::new(),
        }
    }

    /// Appends a parameter set that expects no row data back.
    pub fn exec(mut self, args: Vec<NamedArg>) -> Self {
        self.exec_sets.push(args);
        self
    }

    /// Appends a row-returning parameter set.
    pub fn query(mut self, args: Vec<NamedArg>) -> Self {
        self.query_sets.push(args);
        self
    }

    /// The statement text shared by every parameter set.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The total number of appended parameter sets.
    pub fn len(&self) -> usize {
        self.exec_sets.len() + self.query_sets.len()
    }

    /// True when no parameter set has been appended.
    pub fn is_empty(&self) -> bool {
        self.exec_sets.is_empty() && self.query_sets.is_empty()
    }

    /// Marshals every parameter set in submission order.
    ///
    /// The first set that fails aborts the whole submission; no partial list
    /// is returned and no network call should be made.
    pub(crate) fn parameter_sets(&self) -> Result<Vec<Vec<SqlParameter>>, ArgError> {
        self.exec_sets
            .iter()
            .chain(self.query_sets.iter())
            .map(|set| convert_args(set))
            .collect()
    }
}
