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

//! The top-level database handle.
//!
//! A `Database` holds only immutable configuration and a transport
//! reference, so it is cheap to clone and safe to share; every call is an
//! independent round trip, correlated only when it carries a transaction
//! token.

use crate::args::{convert_args, NamedArg};
use crate::batch::Batch;
use crate::client::{
    BatchExecuteStatementRequest, BeginTransactionRequest, DataApi, ExecuteStatementRequest,
    ExecuteStatementResponse,
};
use crate::error::Error;
use crate::result::StatementResult;
use crate::rows::Rows;
use crate::transaction::Transaction;
use std::sync::Arc;
use tracing::debug;

/// A handle for executing SQL against one Data API cluster.
#[derive(Clone)]
pub struct Database {
    api: Arc<dyn DataApi>,
    resource_arn: String,
    secret_arn: String,
    database: Option<String>,
}

impl Database {
    /// Creates a database handle over the provided transport.
    ///
    /// `resource_arn` identifies the cluster, `secret_arn` the credentials
    /// secret; both are passed through on every call.
    pub fn new(
        api: Arc<dyn DataApi>,
        resource_arn: impl Into<String>,
        secret_arn: impl Into<String>,
    ) -> Self {
        Self {
            api,
            resource_arn: resource_arn.into(),
            secret_arn: secret_arn.into(),
            database: None,
        }
    }

    /// Targets a logical database name within the cluster.
    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    /// The configured cluster identifier.
    pub fn resource_arn(&self) -> &str {
        &self.resource_arn
    }

    /// The configured credentials secret identifier.
    pub fn secret_arn(&self) -> &str {
        &self.secret_arn
    }

    /// Executes SQL that returns no rows. The args fill the statement's
    /// named placeholders.
    pub async fn exec(&self, sql: &str, args: &[NamedArg]) -> Result<StatementResult, Error> {
        let resp = self.execute(sql, args, None).await?;
        Ok(statement_result(resp))
    }

    /// Executes SQL that is expected to return rows.
    pub async fn query(&self, sql: &str, args: &[NamedArg]) -> Result<Rows, Error> {
        let resp = self.execute(sql, args, None).await?;
        Ok(Rows::new(resp.records))
    }

    /// Starts a server-held transaction.
    pub async fn begin(&self) -> Result<Transaction, Error> {
        let req = BeginTransactionRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            database: self.database.clone(),
        };
        let resp = self
            .api
            .begin_transaction(req)
            .await
            .map_err(|e| Error::api("begin transaction", e))?;
        debug!(transaction_id = %resp.transaction_id, "began transaction");
        Ok(Transaction::new(self.clone(), resp.transaction_id))
    }

    /// Submits the batch in one round trip, returning one result per
    /// parameter set in submission order.
    pub async fn exec_batch(&self, batch: Batch) -> Result<Vec<StatementResult>, Error> {
        self.execute_batch(batch, None).await
    }

    pub(crate) async fn execute(
        &self,
        sql: &str,
        args: &[NamedArg],
        transaction_id: Option<&str>,
    ) -> Result<ExecuteStatementResponse, Error> {
        let parameters = convert_args(args)?;
        let req = ExecuteStatementRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            sql: sql.to_string(),
            database: self.database.clone(),
            parameters,
            transaction_id: transaction_id.map(str::to_string),
        };
        debug!(sql, transaction_id, "executing statement");
        self.api
            .execute_statement(req)
            .await
            .map_err(|e| Error::api("execute statement", e))
    }

    pub(crate) async fn execute_batch(
        &self,
        batch: Batch,
        transaction_id: Option<&str>,
    ) -> Result<Vec<StatementResult>, Error> {
        // Marshal everything up front so a bad set aborts before any I/O.
        let parameter_sets = batch.parameter_sets()?;
        let req = BatchExecuteStatementRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            sql: batch.sql().to_string(),
            database: self.database.clone(),
            parameter_sets,
            transaction_id: transaction_id.map(str::to_string),
        };
        debug!(sql = req.sql.as_str(), sets = req.parameter_sets.len(), transaction_id, "executing batch");
        let resp = self
            .api
            .batch_execute_statement(req)
            .await
            .map_err(|e| Error::api("batch execute statement", e))?;

        Ok(resp
            .update_results
            .into_iter()
            .map(|u| StatementResult::new(u.number_of_records_updated.max(0) as u64, u.generated_fields))
            .collect())
    }

    pub(crate) fn api(&self) -> &Arc<dyn DataApi> {
        &self.api
    }
}

fn statement_result(resp: ExecuteStatementResponse) -> StatementResult {
    StatementResult::new(
        resp.number_of_records_updated.max(0) as u64,
        resp.generated_fields,
    )
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("resource_arn", &self.resource_arn)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}
