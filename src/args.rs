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

//! Named-argument conversion into wire parameters.
//!
//! Every statement argument is a [`NamedArg`]; order is preserved exactly,
//! since the service binds parameters by name but batching semantics depend
//! on declaration order. A conversion failure abandons the whole call; a
//! partial parameter list is never produced.

use crate::error::ArgError;
use crate::field::{Field, Value};
use serde::{Deserialize, Serialize};

/// A (name, value) binding for a parameterized statement.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    name: String,
    value: Value,
}

impl NamedArg {
    /// Creates a named argument from any supported host value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The parameter name, without any leading placeholder sigil.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host value bound to this name.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Shorthand for [`NamedArg::new`].
pub fn named(name: impl Into<String>, value: impl Into<Value>) -> NamedArg {
    NamedArg::new(name, value)
}

/// One statement parameter as sent to the service.
///
/// Name uniqueness is the caller's responsibility; this layer does not
/// enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlParameter {
    /// The parameter name.
    pub name: String,
    /// The marshalled wire value.
    pub value: Field,
    /// A service type hint, such as `TIMESTAMP` or `UUID`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub type_hint: Option<String>,
}

/// Converts the provided named arguments into wire parameters, in order.
///
/// The first value that cannot be marshalled fails the whole call; the
/// remaining arguments are not attempted.
pub fn convert_args(args: &[NamedArg]) -> Result<Vec<SqlParameter>, ArgError> {
    let mut params = Vec::with_capacity(args.len());
    for arg in args {
        params.push(SqlParameter {
            name: arg.name.clone(),
            value: arg.value.to_field()?,
            type_hint: arg.value.type_hint().map(str::to_string),
        });
    }
    Ok(params)
}
