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

//! Error types for the Data API SQL client.
//!
//! Three families exist: argument conversion errors raised while turning
//! caller values into wire parameters, scan errors raised while copying wire
//! fields into caller destinations, and remote errors passed through from the
//! transport wrapped with call-identifying context. Nothing is retried or
//! reinterpreted here; retry classification happens at the transport boundary.

use crate::client::ApiError;
use thiserror::Error;

/// The error type returned by database and transaction operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument could not be converted into a wire
    /// parameter. The enclosing call was abandoned before any network I/O.
    #[error("failed to convert arguments: {0}")]
    Arg(#[from] ArgError),

    /// A wire row could not be copied into the caller's destinations.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The remote service rejected or failed the call. The underlying error
    /// is preserved unchanged; `context` names the operation that failed.
    #[error("failed to {context}")]
    Api {
        context: &'static str,
        #[source]
        source: ApiError,
    },
}

impl Error {
    pub(crate) fn api(context: &'static str, source: ApiError) -> Self {
        Error::Api { context, source }
    }
}

/// An error converting a caller-supplied argument into a wire parameter.
///
/// Always fatal to the enclosing call; a partial parameter list is never
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// The value has no representation in the wire protocol, for example a
    /// scalar element inside the generic nested-array fallback.
    #[error("unsupported argument type: {0}")]
    Unsupported(String),
}

/// An error raised by [`Rows::scan`](crate::Rows::scan).
///
/// A scan failure leaves the cursor usable; subsequent rows can still be
/// iterated and scanned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// `scan` was called before the first `next`.
    #[error("scan called before next")]
    NextNotCalled,

    /// `scan` was called after `next` returned false, or on a closed cursor.
    #[error("scan called out of range")]
    RowOutOfRange,

    /// The number of destinations differs from the row's field count.
    #[error("row has {expected} fields but {actual} destinations were given")]
    FieldCountMismatch { expected: usize, actual: usize },

    /// One field of the current row could not be converted. Carries the
    /// offending row and field index for diagnostics.
    #[error("failed to scan field {field} of row {row}: {source}")]
    Field {
        row: usize,
        field: usize,
        source: FieldScanError,
    },
}

/// An error converting a single wire field into a destination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldScanError {
    /// The destination type does not match the populated field variant.
    #[error("expected destination {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Nested-array reconstruction failed.
    #[error(transparent)]
    Array(#[from] ArrayScanError),
}

/// An error raised during nested-array reconstruction.
///
/// `depth` is the nesting level at which the mismatch occurred, starting at
/// zero for the outermost array.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrayScanError {
    /// The destination sequence type does not match the array variant found
    /// at this depth.
    #[error("expected destination {expected}, got {actual} at depth {depth}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
        depth: usize,
    },
}
