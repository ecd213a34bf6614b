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

//! A server-held transaction.
//!
//! The service keeps all transaction state; this type only carries the
//! correlation token and stamps it onto every call made through it.
//! `commit` and `rollback` consume the transaction, so a terminated token
//! can never be reused.

use crate::args::NamedArg;
use crate::batch::Batch;
use crate::client::{CommitTransactionRequest, RollbackTransactionRequest};
use crate::database::Database;
use crate::error::Error;
use crate::result::StatementResult;
use crate::rows::Rows;
use tracing::debug;

/// An open transaction on the remote service.
///
/// Obtained from [`Database::begin`]. Dropping a `Transaction` without
/// committing leaves the server transaction to expire on its own; the
/// service rolls it back when its idle timeout lapses.
#[derive(Debug)]
pub struct Transaction {
    db: Database,
    id: String,
}

impl Transaction {
    pub(crate) fn new(db: Database, id: String) -> Self {
        Self { db, id }
    }

    /// The server-issued token correlating calls to this transaction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Executes SQL within this transaction, returning no rows.
    pub async fn exec(&self, sql: &str, args: &[NamedArg]) -> Result<StatementResult, Error> {
        let resp = self.db.execute(sql, args, Some(&self.id)).await?;
        Ok(StatementResult::new(
            resp.number_of_records_updated.max(0) as u64,
            resp.generated_fields,
        ))
    }

    /// Executes row-returning SQL within this transaction.
    pub async fn query(&self, sql: &str, args: &[NamedArg]) -> Result<Rows, Error> {
        let resp = self.db.execute(sql, args, Some(&self.id)).await?;
        Ok(Rows::new(resp.records))
    }

    /// Submits the batch within this transaction.
    pub async fn exec_batch(&self, batch: Batch) -> Result<Vec<StatementResult>, Error> {
        self.db.execute_batch(batch, Some(&self.id)).await
    }

    /// Makes every change in the transaction durable.
    pub async fn commit(self) -> Result<(), Error> {
        let req = CommitTransactionRequest {
            resource_arn: self.db.resource_arn().to_string(),
            secret_arn: self.db.secret_arn().to_string(),
            transaction_id: self.id.clone(),
        };
        self.db
            .api()
            .commit_transaction(req)
            .await
            .map_err(|e| Error::api("commit transaction", e))?;
        debug!(transaction_id = %self.id, "committed transaction");
        Ok(())
    }

    /// Discards every change in the transaction.
    pub async fn rollback(self) -> Result<(), Error> {
        let req = RollbackTransactionRequest {
            resource_arn: self.db.resource_arn().to_string(),
            secret_arn: self.db.secret_arn().to_string(),
            transaction_id: self.id.clone(),
        };
        self.db
            .api()
            .rollback_transaction(req)
            .await
            .map_err(|e| Error::api("rollback transaction", e))?;
        debug!(transaction_id = %self.id, "rolled back transaction");
        Ok(())
    }
}
