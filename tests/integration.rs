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

//! Integration tests for the Data API SQL client.
//!
//! All tests run against a stub transport that records the last request of
//! each kind and answers with a canned response.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dasql::client::{
    BatchExecuteStatementRequest, BatchExecuteStatementResponse, BeginTransactionRequest,
    BeginTransactionResponse, CommitTransactionRequest, CommitTransactionResponse,
    ExecuteStatementRequest, ExecuteStatementResponse, RollbackTransactionRequest,
    RollbackTransactionResponse, UpdateResult,
};
use dasql::{
    named, ApiError, ArgError, Batch, DataApi, Database, Error, Field, NamedArg, Value,
};

const RESOURCE_ARN: &str = "arn:aws:rds:us-east-1:123456789012:cluster:demo";
const SECRET_ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:demo";

/// A transport stub with recorded requests and scripted responses.
#[derive(Default)]
struct StubApi {
    last_execute: Mutex<Option<ExecuteStatementRequest>>,
    last_begin: Mutex<Option<BeginTransactionRequest>>,
    last_commit: Mutex<Option<CommitTransactionRequest>>,
    last_rollback: Mutex<Option<RollbackTransactionRequest>>,
    last_batch: Mutex<Option<BatchExecuteStatementRequest>>,
    calls: Mutex<u32>,

    next_execute: Mutex<Option<Result<ExecuteStatementResponse, ApiError>>>,
    next_begin: Mutex<Option<BeginTransactionResponse>>,
    next_batch: Mutex<Option<BatchExecuteStatementResponse>>,
}

impl StubApi {
    fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }

    fn bump(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

#[async_trait]
impl DataApi for StubApi {
    async fn execute_statement(
        &self,
        req: ExecuteStatementRequest,
    ) -> Result<ExecuteStatementResponse, ApiError> {
        self.bump();
        *self.last_execute.lock().unwrap() = Some(req);
        self.next_execute
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(ExecuteStatementResponse::default()))
    }

    async fn begin_transaction(
        &self,
        req: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse, ApiError> {
        self.bump();
        *self.last_begin.lock().unwrap() = Some(req);
        Ok(self.next_begin.lock().unwrap().take().unwrap_or_default())
    }

    async fn commit_transaction(
        &self,
        req: CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse, ApiError> {
        self.bump();
        *self.last_commit.lock().unwrap() = Some(req);
        Ok(CommitTransactionResponse::default())
    }

    async fn rollback_transaction(
        &self,
        req: RollbackTransactionRequest,
    ) -> Result<RollbackTransactionResponse, ApiError> {
        self.bump();
        *self.last_rollback.lock().unwrap() = Some(req);
        Ok(RollbackTransactionResponse::default())
    }

    async fn batch_execute_statement(
        &self,
        req: BatchExecuteStatementRequest,
    ) -> Result<BatchExecuteStatementResponse, ApiError> {
        self.bump();
        *self.last_batch.lock().unwrap() = Some(req);
        Ok(self.next_batch.lock().unwrap().take().unwrap_or_default())
    }
}

fn database(api: &Arc<StubApi>) -> Database {
    Database::new(api.clone() as Arc<dyn DataApi>, RESOURCE_ARN, SECRET_ARN)
}

#[tokio::test]
async fn test_exec_round_trip() {
    let api = Arc::new(StubApi::default());
    *api.next_execute.lock().unwrap() = Some(Ok(ExecuteStatementResponse {
        number_of_records_updated: 3,
        generated_fields: vec![Field::Long(77)],
        ..Default::default()
    }));

    let db = database(&api).with_database("inventory");
    let res = db
        .exec(
            "UPDATE widgets SET quantity = :q WHERE color = :color",
            &[named("q", 5), named("color", "red")],
        )
        .await
        .expect("exec failed");

    assert_eq!(res.rows_affected(), 3);
    assert_eq!(res.last_insert_id(), 77);

    let req = api.last_execute.lock().unwrap().take().expect("no request");
    assert_eq!(req.resource_arn, RESOURCE_ARN);
    assert_eq!(req.secret_arn, SECRET_ARN);
    assert_eq!(req.database.as_deref(), Some("inventory"));
    assert_eq!(req.sql, "UPDATE widgets SET quantity = :q WHERE color = :color");
    assert_eq!(req.transaction_id, None);
    assert_eq!(req.parameters.len(), 2);
    assert_eq!(req.parameters[0].name, "q");
    assert_eq!(req.parameters[0].value, Field::Long(5));
    assert_eq!(req.parameters[1].name, "color");
    assert_eq!(req.parameters[1].value, Field::String("red".into()));
}

#[tokio::test]
async fn test_query_scan_round_trip() {
    let api = Arc::new(StubApi::default());
    *api.next_execute.lock().unwrap() = Some(Ok(ExecuteStatementResponse {
        records: vec![
            vec![Field::String("bolt".into()), Field::Long(12)],
            vec![Field::String("nut".into()), Field::Null(true)],
        ],
        ..Default::default()
    }));

    let db = database(&api);
    let mut rows = db
        .query("SELECT name, quantity FROM widgets", &[])
        .await
        .expect("query failed");

    let mut name = String::new();
    let mut quantity: Option<i64> = None;
    let mut seen = Vec::new();
    while rows.next() {
        rows.scan(&mut [&mut name, &mut quantity]).expect("scan failed");
        seen.push((name.clone(), quantity));
    }

    assert_eq!(
        seen,
        vec![("bolt".to_string(), Some(12)), ("nut".to_string(), None)]
    );
}

#[tokio::test]
async fn test_arg_error_makes_no_network_call() {
    let api = Arc::new(StubApi::default());
    let db = database(&api);

    let bogus = NamedArg::new("xs", Value::Array(vec![Value::Long(1)]));
    let err = db
        .exec("UPDATE widgets SET xs = :xs", &[bogus])
        .await
        .expect_err("expected marshal failure");

    assert!(matches!(err, Error::Arg(ArgError::Unsupported(_))));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_api_error_carries_context() {
    let api = Arc::new(StubApi::default());
    *api.next_execute.lock().unwrap() = Some(Err(ApiError::new(400, "syntax error")));

    let db = database(&api);
    let err = db.exec("NOT SQL", &[]).await.expect_err("expected failure");

    match &err {
        Error::Api { context, source } => {
            assert_eq!(*context, "execute statement");
            assert_eq!(*source, ApiError::new(400, "syntax error"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("execute statement"));
}

#[tokio::test]
async fn test_transaction_threads_token() {
    let api = Arc::new(StubApi::default());
    *api.next_begin.lock().unwrap() = Some(BeginTransactionResponse {
        transaction_id: "txn-abc".into(),
    });

    let db = database(&api);
    let tx = db.begin().await.expect("begin failed");
    assert_eq!(tx.id(), "txn-abc");

    let begin_req = api.last_begin.lock().unwrap().take().expect("no begin");
    assert_eq!(begin_req.resource_arn, RESOURCE_ARN);

    tx.exec("DELETE FROM widgets", &[]).await.expect("exec failed");
    let exec_req = api.last_execute.lock().unwrap().take().expect("no execute");
    assert_eq!(exec_req.transaction_id.as_deref(), Some("txn-abc"));

    tx.commit().await.expect("commit failed");
    let commit_req = api.last_commit.lock().unwrap().take().expect("no commit");
    assert_eq!(commit_req.transaction_id, "txn-abc");
    assert_eq!(commit_req.resource_arn, RESOURCE_ARN);
    assert_eq!(commit_req.secret_arn, SECRET_ARN);
}

#[tokio::test]
async fn test_transaction_rollback() {
    let api = Arc::new(StubApi::default());
    *api.next_begin.lock().unwrap() = Some(BeginTransactionResponse {
        transaction_id: "txn-rollback".into(),
    });

    let db = database(&api);
    let tx = db.begin().await.expect("begin failed");
    tx.rollback().await.expect("rollback failed");

    let req = api.last_rollback.lock().unwrap().take().expect("no rollback");
    assert_eq!(req.transaction_id, "txn-rollback");
}

#[tokio::test]
async fn test_batch_submission_order_and_results() {
    let api = Arc::new(StubApi::default());
    *api.next_batch.lock().unwrap() = Some(BatchExecuteStatementResponse {
        update_results: vec![
            UpdateResult {
                number_of_records_updated: 1,
                generated_fields: vec![Field::Long(10)],
            },
            UpdateResult {
                number_of_records_updated: 1,
                generated_fields: vec![Field::Long(11)],
            },
            UpdateResult::default(),
        ],
    });

    let db = database(&api);
    let batch = Batch::new("INSERT INTO widgets (name) VALUES (:name)")
        .query(vec![named("name", "q-last")])
        .exec(vec![named("name", "e-first")])
        .exec(vec![named("name", "e-second")]);

    let results = db.exec_batch(batch).await.expect("batch failed");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].last_insert_id(), 10);
    assert_eq!(results[1].last_insert_id(), 11);
    assert_eq!(results[2].last_insert_id(), 0);

    let req = api.last_batch.lock().unwrap().take().expect("no batch");
    assert_eq!(req.parameter_sets.len(), 3);
    assert_eq!(req.parameter_sets[0][0].value, Field::String("e-first".into()));
    assert_eq!(req.parameter_sets[1][0].value, Field::String("e-second".into()));
    assert_eq!(req.parameter_sets[2][0].value, Field::String("q-last".into()));
    assert_eq!(req.transaction_id, None);
}

#[tokio::test]
async fn test_batch_marshal_failure_aborts_before_io() {
    let api = Arc::new(StubApi::default());
    let db = database(&api);

    let batch = Batch::new("UPDATE widgets SET a = :a")
        .exec(vec![named("a", "fine")])
        .exec(vec![NamedArg::new("a", Value::Array(vec![Value::Null]))]);

    let err = db.exec_batch(batch).await.expect_err("expected failure");
    assert!(matches!(err, Error::Arg(ArgError::Unsupported(_))));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_batch_in_transaction_threads_token() {
    let api = Arc::new(StubApi::default());
    *api.next_begin.lock().unwrap() = Some(BeginTransactionResponse {
        transaction_id: "txn-batch".into(),
    });

    let db = database(&api);
    let tx = db.begin().await.expect("begin failed");

    let batch = Batch::new("INSERT INTO widgets (name) VALUES (:name)")
        .exec(vec![named("name", "a")]);
    tx.exec_batch(batch).await.expect("batch failed");

    let req = api.last_batch.lock().unwrap().take().expect("no batch");
    assert_eq!(req.transaction_id.as_deref(), Some("txn-batch"));
}
