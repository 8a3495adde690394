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

//! In-memory database implementation.

use crate::db::{BareTx, Db, DbResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A database that keeps all of its state of type `S` in process memory.
///
/// Cloning the database yields a new handle to the same state.  The state is never persisted and
/// goes away once the last handle is dropped.
pub struct MemoryDb<S> {
    /// The committed state, guarded by the store-wide lock.
    state: Arc<Mutex<S>>,
}

impl<S> Clone for MemoryDb<S> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone() }
    }
}

impl<S: Default> Default for MemoryDb<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> MemoryDb<S> {
    /// Creates a new database whose committed state starts as `initial`.
    pub fn new(initial: S) -> Self {
        Self { state: Arc::from(Mutex::new(initial)) }
    }
}

#[async_trait]
impl<S> Db for MemoryDb<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Tx = MemoryTx<S>;

    async fn begin(&self) -> DbResult<Self::Tx> {
        let guard = self.state.clone().lock_owned().await;
        let data = S::clone(&guard);
        Ok(MemoryTx { guard, data })
    }
}

/// An open transaction against a `MemoryDb`.
///
/// The transaction works on a private copy of the state and holds the lock on the committed state
/// until it is committed or dropped.
pub struct MemoryTx<S> {
    /// Exclusive access to the committed state.
    guard: OwnedMutexGuard<S>,

    /// Working copy of the state with the changes done by this transaction.
    data: S,
}

impl<S> MemoryTx<S> {
    /// Returns a read-only view of the state as seen by this transaction.
    pub fn data(&self) -> &S {
        &self.data
    }

    /// Returns a mutable view of the state as seen by this transaction.
    pub fn data_mut(&mut self) -> &mut S {
        &mut self.data
    }
}

#[async_trait]
impl<S> BareTx for MemoryTx<S>
where
    S: Send + Sync,
{
    async fn commit(self) -> DbResult<()> {
        let MemoryTx { mut guard, data } = self;
        *guard = data;
        Ok(())
    }
}
