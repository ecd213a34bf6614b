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

//! Forward-only cursor over one query's result rows.

use crate::error::ScanError;
use crate::field::Field;
use crate::scan::{scan_row, ScanTarget};

/// The rows returned by a query.
///
/// The cursor starts before the first row; call [`Rows::next`] before every
/// [`Rows::scan`]. The whole result set is held in memory, so `close` only
/// marks the cursor unusable. Iteration state is exclusively owned; the
/// `&mut` protocol makes concurrent use impossible by construction.
#[derive(Debug)]
pub struct Rows {
    records: Vec<Vec<Field>>,
    pos: Option<usize>,
    closed: bool,
}

impl Rows {
    pub(crate) fn new(records: Vec<Vec<Field>>) -> Self {
        Self {
            records,
            pos: None,
            closed: false,
        }
    }

    /// Advances to the next row, returning true while one is available.
    pub fn next(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let next = self.pos.map_or(0, |p| p.saturating_add(1));
        self.pos = Some(next);
        next < self.records.len()
    }

    /// Copies the current row's fields into `dest`, one destination per
    /// column.
    ///
    /// Fails with [`ScanError::NextNotCalled`] before the first `next`, with
    /// [`ScanError::RowOutOfRange`] once the cursor is exhausted or closed,
    /// and with [`ScanError::FieldCountMismatch`] on arity mismatch. A
    /// per-field failure reports the offending row and field index and leaves
    /// the cursor usable.
    pub fn scan(&mut self, dest: &mut [&mut dyn ScanTarget]) -> Result<(), ScanError> {
        let pos = match self.pos {
            None => return Err(ScanError::NextNotCalled),
            Some(p) if p >= self.records.len() => return Err(ScanError::RowOutOfRange),
            Some(p) => p,
        };

        let row = &self.records[pos];
        if row.len() != dest.len() {
            return Err(ScanError::FieldCountMismatch {
                expected: row.len(),
                actual: dest.len(),
            });
        }

        scan_row(row, pos, dest)
    }

    /// Marks the cursor unusable. Idempotent; safe to call at any point.
    pub fn close(&mut self) {
        self.closed = true;
        self.pos = Some(self.records.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldScanError;

    fn rows(records: Vec<Vec<Field>>) -> Rows {
        Rows::new(records)
    }

    #[test]
    fn test_next_then_scan() {
        let mut rows = rows(vec![vec![Field::String("x".into())]]);
        assert!(rows.next());

        let mut s = String::new();
        rows.scan(&mut [&mut s]).unwrap();
        assert_eq!(s, "x");

        assert!(!rows.next());
    }

    #[test]
    fn test_scan_before_next() {
        let mut rows = rows(vec![vec![Field::Long(1)]]);
        let mut n = 0i64;
        assert_eq!(rows.scan(&mut [&mut n]), Err(ScanError::NextNotCalled));
    }

    #[test]
    fn test_scan_after_exhaustion() {
        let mut rows = rows(vec![]);
        assert!(!rows.next());

        let mut n = 0i64;
        assert_eq!(rows.scan(&mut [&mut n]), Err(ScanError::RowOutOfRange));
    }

    #[test]
    fn test_scan_field_count_mismatch() {
        let mut rows = rows(vec![vec![Field::Long(1), Field::Long(2)]]);
        assert!(rows.next());

        let mut n = 0i64;
        assert_eq!(
            rows.scan(&mut [&mut n]),
            Err(ScanError::FieldCountMismatch {
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_next_true_exactly_len_times() {
        let mut rows = rows(vec![
            vec![Field::Long(1)],
            vec![Field::Long(2)],
            vec![Field::Long(3)],
        ]);
        let mut trues = 0;
        while rows.next() {
            trues += 1;
        }
        assert_eq!(trues, 3);
        assert!(!rows.next());
    }

    #[test]
    fn test_cursor_survives_scan_error() {
        let mut rows = rows(vec![vec![Field::String("oops".into())], vec![Field::Long(7)]]);
        assert!(rows.next());

        let mut n = 0i64;
        let err = rows.scan(&mut [&mut n]).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Field {
                row: 0,
                field: 0,
                source: FieldScanError::TypeMismatch { .. },
            }
        ));

        // Still usable for the next row.
        assert!(rows.next());
        rows.scan(&mut [&mut n]).unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn test_close_is_idempotent_and_disables_cursor() {
        let mut rows = rows(vec![vec![Field::Long(1)]]);
        rows.close();
        rows.close();

        assert!(!rows.next());
        let mut n = 0i64;
        assert_eq!(rows.scan(&mut [&mut n]), Err(ScanError::RowOutOfRange));
    }
}
