// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic abstraction over the storage of a service.
//!
//! Services keep their state in process memory and access it exclusively via transactions.  A
//! transaction holds the store-wide lock for its whole life, so all operations against the store
//! are serialized, and it publishes its changes only when committed.

use async_trait::async_trait;

mod memory;
pub use memory::{MemoryDb, MemoryTx};

/// Database errors.  Any unexpected errors that come from the store are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Common operations for all transactions.
#[async_trait]
pub trait BareTx: Send {
    /// Commits the transaction, publishing all of its changes at once.
    async fn commit(self) -> DbResult<()>;
}

/// Abstraction over the database.
#[async_trait]
pub trait Db {
    /// Type of the transactions returned by `begin`.
    type Tx: BareTx + Send + Sync + 'static;

    /// Begins a transaction, waiting for any other open transaction to finish first.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned transaction.
    /// Otherwise the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<Self::Tx>;
}

/// Macros to help instantiate tests for multiple database implementations.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Instantiates the `module::name` test for the database configured by `setup`.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path ) => {
            #[tokio::test]
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Instantiates a collection of tests for a specific database implementation.
    ///
    /// The database to run the tests against is determined by the `setup` expression, which
    /// needs to return a fresh database object parameterized with the desired transaction type.
    #[macro_export]
    macro_rules! generate_tests [
        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}
