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

//! Wire field representation and the host-to-wire half of the field codec.
//!
//! The Data API represents every value as a tagged union: exactly one member
//! of a field is populated. Both unions are modelled as Rust enums so that
//! mutual exclusivity is structural rather than convention. Serialization
//! matches the service's JSON member names (`stringValue`, `arrayValue`, ...).

use crate::error::ArgError;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One wire value as exchanged with the remote query service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// An SQL NULL. The wrapped bool mirrors the wire member; the service
    /// always sends `true`.
    #[serde(rename = "isNull")]
    Null(bool),
    /// A character value.
    #[serde(rename = "stringValue")]
    String(String),
    /// A 64-bit integer value.
    #[serde(rename = "longValue")]
    Long(i64),
    /// A double-precision value.
    #[serde(rename = "doubleValue")]
    Double(f64),
    /// A boolean value.
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// A binary value, base64-encoded on the wire.
    #[serde(rename = "blobValue")]
    Blob(#[serde(with = "blob_base64")] Bytes),
    /// An array value, possibly nested.
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
}

/// An array wire value: homogeneous at the leaves, nested to arbitrary depth
/// through the `Arrays` variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayValue {
    /// An array of character values.
    #[serde(rename = "stringValues")]
    Strings(Vec<String>),
    /// An array of 64-bit integers.
    #[serde(rename = "longValues")]
    Longs(Vec<i64>),
    /// An array of double-precision values.
    #[serde(rename = "doubleValues")]
    Doubles(Vec<f64>),
    /// An array of booleans.
    #[serde(rename = "booleanValues")]
    Booleans(Vec<bool>),
    /// An array of arrays.
    #[serde(rename = "arrayValues")]
    Arrays(Vec<ArrayValue>),
}

impl ArrayValue {
    /// Name of the destination type required to scan this variant.
    pub(crate) fn expected_target(&self) -> &'static str {
        match self {
            ArrayValue::Strings(_) => "Vec<String>",
            ArrayValue::Longs(_) => "Vec<i64>",
            ArrayValue::Doubles(_) => "Vec<f64>",
            ArrayValue::Booleans(_) => "Vec<bool>",
            ArrayValue::Arrays(_) => "nested Vec",
        }
    }
}

impl Field {
    /// Name of the destination type required to scan this variant.
    pub(crate) fn expected_target(&self) -> &'static str {
        match self {
            Field::Null(_) => "any destination",
            Field::String(_) => "String",
            Field::Long(_) => "i64",
            Field::Double(_) => "f64",
            Field::Boolean(_) => "bool",
            Field::Blob(_) => "Vec<u8> or Bytes",
            Field::Array(av) => av.expected_target(),
        }
    }
}

/// A host value that can be marshalled into a wire [`Field`].
///
/// This is the closed set of typed conversion branches of the codec; the one
/// generic fallback is [`Value::Array`], which walks its elements recursively
/// and is the only place a marshal can fail at runtime.
///
/// The two blob variants carry distinct ownership policies: [`Value::Blob`]
/// is copied into the wire field, so later mutation of the source buffer is
/// isolated; [`Value::SharedBlob`] shares the caller's allocation with the
/// wire field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An SQL NULL.
    Null,
    /// A character value.
    String(String),
    /// A 64-bit integer.
    Long(i64),
    /// A double-precision value.
    Double(f64),
    /// A boolean.
    Boolean(bool),
    /// A binary value, defensively copied into the wire field.
    Blob(Vec<u8>),
    /// A binary value sharing its allocation with the wire field.
    SharedBlob(Bytes),
    /// An array of strings.
    Strings(Vec<String>),
    /// An array of 64-bit integers.
    Longs(Vec<i64>),
    /// An array of doubles.
    Doubles(Vec<f64>),
    /// An array of booleans.
    Booleans(Vec<bool>),
    /// The generic nested-array fallback; every element must itself marshal
    /// to an array value.
    Array(Vec<Value>),
    /// A timestamp, sent as a string with the `TIMESTAMP` type hint.
    Timestamp(DateTime<Utc>),
    /// A date, sent as a string with the `DATE` type hint.
    Date(NaiveDate),
    /// A time of day, sent as a string with the `TIME` type hint.
    Time(NaiveTime),
    /// A UUID, sent as a string with the `UUID` type hint.
    Uuid(Uuid),
    /// A JSON document, sent as a string with the `JSON` type hint.
    Json(serde_json::Value),
}

impl Value {
    /// Marshals this value into a wire field.
    pub fn to_field(&self) -> Result<Field, ArgError> {
        Ok(match self {
            Value::Null => Field::Null(true),
            Value::String(v) => Field::String(v.clone()),
            Value::Long(v) => Field::Long(*v),
            Value::Double(v) => Field::Double(*v),
            Value::Boolean(v) => Field::Boolean(*v),
            Value::Blob(v) => Field::Blob(Bytes::from(v.clone())),
            Value::SharedBlob(v) => Field::Blob(v.clone()),
            Value::Timestamp(v) => Field::String(v.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
            Value::Date(v) => Field::String(v.format("%Y-%m-%d").to_string()),
            Value::Time(v) => Field::String(v.format("%H:%M:%S%.3f").to_string()),
            Value::Uuid(v) => Field::String(v.to_string()),
            Value::Json(v) => Field::String(v.to_string()),
            Value::Strings(_)
            | Value::Longs(_)
            | Value::Doubles(_)
            | Value::Booleans(_)
            | Value::Array(_) => Field::Array(self.to_array_value()?),
        })
    }

    /// The service type hint accompanying this value, if any.
    pub fn type_hint(&self) -> Option<&'static str> {
        match self {
            Value::Timestamp(_) => Some("TIMESTAMP"),
            Value::Date(_) => Some("DATE"),
            Value::Time(_) => Some("TIME"),
            Value::Uuid(_) => Some("UUID"),
            Value::Json(_) => Some("JSON"),
            _ => None,
        }
    }

    fn to_array_value(&self) -> Result<ArrayValue, ArgError> {
        match self {
            Value::Strings(v) => Ok(ArrayValue::Strings(v.clone())),
            Value::Longs(v) => Ok(ArrayValue::Longs(v.clone())),
            Value::Doubles(v) => Ok(ArrayValue::Doubles(v.clone())),
            Value::Booleans(v) => Ok(ArrayValue::Booleans(v.clone())),
            Value::Array(items) => items
                .iter()
                .map(Value::to_array_value)
                .collect::<Result<Vec<_>, _>>()
                .map(ArrayValue::Arrays),
            other => Err(ArgError::Unsupported(other.kind_name().to_string())),
        }
    }

    /// A short name for this value's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::String(_) => "String",
            Value::Long(_) => "Long",
            Value::Double(_) => "Double",
            Value::Boolean(_) => "Boolean",
            Value::Blob(_) => "Blob",
            Value::SharedBlob(_) => "SharedBlob",
            Value::Strings(_) => "Strings",
            Value::Longs(_) => "Longs",
            Value::Doubles(_) => "Doubles",
            Value::Booleans(_) => "Booleans",
            Value::Array(_) => "Array",
            Value::Timestamp(_) => "Timestamp",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::Uuid(_) => "Uuid",
            Value::Json(_) => "Json",
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Long(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::SharedBlob(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Strings(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::Strings(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::Longs(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Doubles(v)
    }
}

impl From<Vec<bool>> for Value {
    fn from(v: Vec<bool>) -> Self {
        Value::Booleans(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl<T> From<Vec<Vec<T>>> for Value
where
    Vec<T>: Into<Value>,
{
    fn from(v: Vec<Vec<T>>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

mod blob_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(b: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(b))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
