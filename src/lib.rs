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

//! A SQL client for the AWS Aurora Serverless Data API.
//!
//! The Data API is a stateless HTTP front end over a relational cluster:
//! every statement, including those inside a transaction, is an independent
//! request correlated by ARNs and an optional transaction token. This crate
//! provides the typed client surface over such a transport — named-argument
//! marshalling into the service's tagged JSON value encoding, a row cursor
//! with trait-driven field scanning, server-held transactions, and batched
//! statement execution.
//!
//! The transport itself is behind the [`client::DataApi`] trait, so tests
//! and alternative backends plug in without touching the client logic.
//!
//! ```no_run
//! use dasql::{named, Database};
//! # async fn demo(api: std::sync::Arc<dyn dasql::DataApi>) -> Result<(), dasql::Error> {
//! let db = Database::new(api, "arn:aws:rds:...", "arn:aws:secretsmanager:...")
//!     .with_database("inventory");
//!
//! let mut rows = db
//!     .query(
//!         "SELECT name, quantity FROM widgets WHERE color = :color",
//!         &[named("color", "red")],
//!     )
//!     .await?;
//!
//! let mut name = String::new();
//! let mut quantity = 0i64;
//! while rows.next() {
//!     rows.scan(&mut [&mut name, &mut quantity])?;
//!     println!("{name}: {quantity}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod batch;
pub mod client;
pub mod database;
pub mod error;
pub mod field;
pub mod result;
pub mod retry;
pub mod rows;
pub mod scan;
pub mod transaction;

pub use args::{convert_args, named, NamedArg, SqlParameter};
pub use batch::Batch;
pub use client::{ApiError, DataApi};
pub use database::Database;
pub use error::{ArgError, ArrayScanError, Error, FieldScanError, ScanError};
pub use field::{ArrayValue, Field, Value};
pub use result::StatementResult;
pub use retry::{ColdStartRetry, ExponentialBackoff, RetryPolicy};
pub use rows::Rows;
pub use scan::{ScanArray, ScanTarget};
pub use transaction::Transaction;
