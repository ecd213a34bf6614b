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

//! The transport contract consumed by this crate.
//!
//! [`DataApi`] is the strict subset of the Data API this crate needs: one
//! method per remote operation, each a single stateless round trip. The
//! request and response payloads serialize to the service's JSON member
//! names, but the transport itself (HTTP, signing, retries) belongs to the
//! implementor. Cancelling or timing out a call means dropping its future.

use crate::args::SqlParameter;
use crate::field::Field;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error returned by the remote service or its transport.
///
/// Carried through to callers unchanged; only the retry classifier at the
/// transport boundary interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status_code})")]
pub struct ApiError {
    /// The HTTP status the service answered with, 0 when the call never
    /// reached it.
    pub status_code: u16,
    /// The service's error message, verbatim.
    pub message: String,
}

impl ApiError {
    /// Creates an error with the given status and message.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

/// Request payload for `ExecuteStatement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementRequest {
    /// Identifies the target database cluster.
    pub resource_arn: String,
    /// Identifies the credentials secret.
    pub secret_arn: String,
    /// The statement to run.
    pub sql: String,
    /// Logical database name, when the cluster hosts more than one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub database: Option<String>,
    /// Statement parameters, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<SqlParameter>,
    /// Correlates this call to a server-held transaction.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transaction_id: Option<String>,
}

/// Response payload for `ExecuteStatement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementResponse {
    /// Result rows, one field per projected column.
    #[serde(default)]
    pub records: Vec<Vec<Field>>,
    /// Server-generated values for a write statement.
    #[serde(default)]
    pub generated_fields: Vec<Field>,
    /// Rows changed by a write statement.
    #[serde(default)]
    pub number_of_records_updated: i64,
}

/// Request payload for `BeginTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub database: Option<String>,
}

/// Response payload for `BeginTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionResponse {
    /// The token correlating subsequent calls to this transaction.
    pub transaction_id: String,
}

/// Request payload for `CommitTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub transaction_id: String,
}

/// Response payload for `CommitTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionResponse {
    #[serde(default)]
    pub transaction_status: String,
}

/// Request payload for `RollbackTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub transaction_id: String,
}

/// Response payload for `RollbackTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackTransactionResponse {
    #[serde(default)]
    pub transaction_status: String,
}

/// Request payload for `BatchExecuteStatement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExecuteStatementRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub database: Option<String>,
    /// One entry per submitted parameter set, in submission order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameter_sets: Vec<Vec<SqlParameter>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transaction_id: Option<String>,
}

/// Per-set outcome of a batched execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Server-generated values for this parameter set.
    #[serde(default)]
    pub generated_fields: Vec<Field>,
    /// Rows changed by this parameter set.
    #[serde(default)]
    pub number_of_records_updated: i64,
}

/// Response payload for `BatchExecuteStatement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExecuteStatementResponse {
    /// One outcome per submitted parameter set, in submission order.
    #[serde(default)]
    pub update_results: Vec<UpdateResult>,
}

/// The remote operations this crate consumes from a transport collaborator.
#[async_trait]
pub trait DataApi: Send + Sync {
    /// Runs one SQL statement.
    async fn execute_statement(
        &self,
        req: ExecuteStatementRequest,
    ) -> Result<ExecuteStatementResponse, ApiError>;

    /// Starts a server-held transaction and returns its token.
    async fn begin_transaction(
        &self,
        req: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse, ApiError>;

    /// Commits the transaction identified by the request token.
    async fn commit_transaction(
        &self,
        req: CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse, ApiError>;

    /// Rolls back the transaction identified by the request token.
    async fn rollback_transaction(
        &self,
        req: RollbackTransactionRequest,
    ) -> Result<RollbackTransactionResponse, ApiError>;

    /// Runs one SQL statement against many parameter sets.
    async fn batch_execute_statement(
        &self,
        req: BatchExecuteStatementRequest,
    ) -> Result<BatchExecuteStatementResponse, ApiError>;
}
