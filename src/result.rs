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

//! The outcome of one executed write statement.

use crate::field::Field;

/// The result of executing a statement that returns no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementResult {
    rows_affected: u64,
    generated_fields: Vec<Field>,
}

impl StatementResult {
    pub(crate) fn new(rows_affected: u64, generated_fields: Vec<Field>) -> Self {
        Self {
            rows_affected,
            generated_fields,
        }
    }

    /// The number of rows changed by the statement.
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    /// The auto-generated identifier of the inserted row, best effort.
    ///
    /// Scans the generated-field set for the first integer-valued field and
    /// returns it, defaulting to zero when none is present. The service does
    /// not guarantee which generated value comes first, so treat this as a
    /// heuristic rather than a contract.
    pub fn last_insert_id(&self) -> i64 {
        self.generated_fields
            .iter()
            .find_map(|f| match f {
                Field::Long(v) => Some(*v),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// The raw server-generated values returned for the statement.
    pub fn generated_fields(&self) -> &[Field] {
        &self.generated_fields
    }
}
