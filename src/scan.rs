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

//! The wire-to-host half of the field codec.
//!
//! Destinations implement [`ScanTarget`]; the crate provides impls for the
//! closed set of supported types, and any caller type may implement the trait
//! itself to receive raw wire values, including the null token. A null field
//! scanned into a plain (non-`Option`) destination is deliberately a no-op,
//! not an error.
//!
//! Blob destinations mirror the two marshal-side ownership policies:
//! `Vec<u8>` receives a defensive copy, [`Bytes`] shares the wire value's
//! allocation.

use crate::error::{ArrayScanError, FieldScanError, ScanError};
use crate::field::{ArrayValue, Field};
use bytes::Bytes;

/// A destination slot for one wire field.
///
/// This is the self-converting capability of the scanner: implementing it on
/// your own type lets [`Rows::scan`](crate::Rows::scan) hand you the raw
/// field, nulls included.
pub trait ScanTarget {
    /// Copies `src` into this destination, or reports why it cannot.
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError>;
}

/// A destination for one array wire value, possibly nested.
///
/// Implemented for the leaf vector types and, recursively, for vectors of
/// implementors. `depth` counts nesting levels from the outermost array and
/// is carried into mismatch diagnostics.
pub trait ScanArray {
    /// Copies `src` into this destination, growing it if it is shorter than
    /// the source.
    fn scan_array(&mut self, src: &ArrayValue, depth: usize) -> Result<(), ArrayScanError>;
}

fn mismatch(src: &Field, actual: &'static str) -> FieldScanError {
    FieldScanError::TypeMismatch {
        expected: src.expected_target(),
        actual,
    }
}

fn array_mismatch(src: &ArrayValue, actual: &'static str, depth: usize) -> ArrayScanError {
    ArrayScanError::TypeMismatch {
        expected: src.expected_target(),
        actual,
        depth,
    }
}

impl ScanTarget for String {
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::String(v) => {
                *self = v.clone();
                Ok(())
            }
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "String")),
        }
    }
}

impl ScanTarget for i64 {
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::Long(v) => {
                *self = *v;
                Ok(())
            }
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "i64")),
        }
    }
}

impl ScanTarget for f64 {
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::Double(v) => {
                *self = *v;
                Ok(())
            }
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "f64")),
        }
    }
}

impl ScanTarget for bool {
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::Boolean(v) => {
                *self = *v;
                Ok(())
            }
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "bool")),
        }
    }
}

// Copy-policy blob destination: independent allocation.
impl ScanTarget for Vec<u8> {
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::Blob(v) => {
                *self = v.to_vec();
                Ok(())
            }
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "Vec<u8>")),
        }
    }
}

// Alias-policy blob destination: shares the wire value's allocation.
impl ScanTarget for Bytes {
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::Blob(v) => {
                *self = v.clone();
                Ok(())
            }
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "Bytes")),
        }
    }
}

macro_rules! option_scan_target {
    ($ty:ty, $variant:path, $name:literal) => {
        impl ScanTarget for Option<$ty> {
            fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
                match src {
                    $variant(v) => {
                        *self = Some(v.clone());
                        Ok(())
                    }
                    Field::Null(_) => {
                        *self = None;
                        Ok(())
                    }
                    other => Err(mismatch(other, $name)),
                }
            }
        }
    };
}

option_scan_target!(String, Field::String, "Option<String>");
option_scan_target!(i64, Field::Long, "Option<i64>");
option_scan_target!(f64, Field::Double, "Option<f64>");
option_scan_target!(bool, Field::Boolean, "Option<bool>");

impl ScanArray for Vec<String> {
    fn scan_array(&mut self, src: &ArrayValue, depth: usize) -> Result<(), ArrayScanError> {
        match src {
            ArrayValue::Strings(vs) => {
                *self = vs.clone();
                Ok(())
            }
            other => Err(array_mismatch(other, "Vec<String>", depth)),
        }
    }
}

impl ScanArray for Vec<i64> {
    fn scan_array(&mut self, src: &ArrayValue, depth: usize) -> Result<(), ArrayScanError> {
        match src {
            ArrayValue::Longs(vs) => {
                *self = vs.clone();
                Ok(())
            }
            other => Err(array_mismatch(other, "Vec<i64>", depth)),
        }
    }
}

impl ScanArray for Vec<f64> {
    fn scan_array(&mut self, src: &ArrayValue, depth: usize) -> Result<(), ArrayScanError> {
        match src {
            ArrayValue::Doubles(vs) => {
                *self = vs.clone();
                Ok(())
            }
            other => Err(array_mismatch(other, "Vec<f64>", depth)),
        }
    }
}

impl ScanArray for Vec<bool> {
    fn scan_array(&mut self, src: &ArrayValue, depth: usize) -> Result<(), ArrayScanError> {
        match src {
            ArrayValue::Booleans(vs) => {
                *self = vs.clone();
                Ok(())
            }
            other => Err(array_mismatch(other, "Vec<bool>", depth)),
        }
    }
}

impl<T> ScanArray for Vec<Vec<T>>
where
    Vec<T>: ScanArray,
{
    fn scan_array(&mut self, src: &ArrayValue, depth: usize) -> Result<(), ArrayScanError> {
        match src {
            ArrayValue::Arrays(items) => {
                // Grow to the source length; existing longer tails are kept.
                if self.len() < items.len() {
                    self.resize_with(items.len(), Vec::new);
                }
                for (i, item) in items.iter().enumerate() {
                    self[i].scan_array(item, depth + 1)?;
                }
                Ok(())
            }
            other => Err(array_mismatch(
                other,
                std::any::type_name::<Vec<Vec<T>>>(),
                depth,
            )),
        }
    }
}

macro_rules! array_scan_target {
    ($ty:ty, $name:literal) => {
        impl ScanTarget for $ty {
            fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
                match src {
                    Field::Array(av) => self.scan_array(av, 0).map_err(FieldScanError::Array),
                    Field::Null(_) => Ok(()),
                    other => Err(mismatch(other, $name)),
                }
            }
        }
    };
}

array_scan_target!(Vec<String>, "Vec<String>");
array_scan_target!(Vec<i64>, "Vec<i64>");
array_scan_target!(Vec<f64>, "Vec<f64>");
array_scan_target!(Vec<bool>, "Vec<bool>");

impl<T> ScanTarget for Vec<Vec<T>>
where
    Vec<T>: ScanArray,
{
    fn scan_field(&mut self, src: &Field) -> Result<(), FieldScanError> {
        match src {
            Field::Array(av) => self.scan_array(av, 0).map_err(FieldScanError::Array),
            Field::Null(_) => Ok(()),
            other => Err(mismatch(other, "nested Vec")),
        }
    }
}

/// Copies the fields of `row` into `dest`, reporting the first per-field
/// failure with its row and field index. Arity is the caller's concern.
pub(crate) fn scan_row(
    row: &[Field],
    row_index: usize,
    dest: &mut [&mut dyn ScanTarget],
) -> Result<(), ScanError> {
    for (i, field) in row.iter().enumerate() {
        dest[i]
            .scan_field(field)
            .map_err(|source| ScanError::Field {
                row: row_index,
                field: i,
                source,
            })?;
    }
    Ok(())
}
