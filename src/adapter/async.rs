//! Asynchronous request handler
//!
//! Serves requests through an [`AsyncLedgerEngine`] on a tokio
//! multi-threaded runtime owned by the handler.
//!
//! # Design
//!
//! - The runtime is built once, with the configured number of worker
//!   threads, and reused for every request.
//! - `handle` blocks the calling thread on the request's future, so the
//!   handler exposes the same synchronous interface as the sync strategy.
//! - The handler must not be called from inside another tokio runtime.

use crate::adapter::{Request, RequestHandler, Response, ResponseBody, Status};
use crate::core::{AsyncLedgerEngine, AsyncRecordStore};
use crate::io::AsyncFileRecordStore;
use tokio::runtime::Runtime;
use tracing::debug;

/// Asynchronous request handler
#[derive(Debug)]
pub struct AsyncRequestHandler<S = AsyncFileRecordStore> {
    runtime: Runtime,
    engine: AsyncLedgerEngine<S>,
}

impl<S: AsyncRecordStore> AsyncRequestHandler<S> {
    /// Create a handler with its own runtime of `worker_threads` threads
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be built.
    pub fn new(store: S, worker_threads: usize) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads)
            .enable_all()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        debug!(worker_threads, "async runtime started");

        Ok(Self {
            runtime,
            engine: AsyncLedgerEngine::new(store),
        })
    }

    pub fn engine(&self) -> &AsyncLedgerEngine<S> {
        &self.engine
    }

    async fn dispatch(&self, request: Request) -> Response {
        let engine = &self.engine;

        match request {
            Request::ListAccounts => Response::from_result(
                engine.list_accounts().await,
                Status::Ok,
                ResponseBody::Accounts,
            ),
            Request::GetAccount { id } => Response::from_result(
                engine.get_account(&id).await,
                Status::Ok,
                ResponseBody::Account,
            ),
            Request::CreateAccount(request) => Response::from_result(
                engine.create_account(request).await,
                Status::Created,
                ResponseBody::Account,
            ),
            Request::Deposit(request) => Response::from_result(
                engine.deposit(request).await,
                Status::Ok,
                ResponseBody::Account,
            ),
            Request::SetCredit(request) => Response::from_result(
                engine.set_credit(request).await,
                Status::Ok,
                ResponseBody::Account,
            ),
            Request::Transfer(request) => {
                Response::from_result(engine.transfer(request).await, Status::Ok, |receipt| {
                    ResponseBody::Accounts(receipt.into_pair())
                })
            }
            Request::DeleteAccount { id } => Response::from_result(
                engine.delete_account(&id).await,
                Status::Ok,
                ResponseBody::Message,
            ),
            Request::FilterByCash { threshold } => Response::from_result(
                engine.filter_by_cash(threshold).await,
                Status::Ok,
                ResponseBody::Accounts,
            ),
        }
    }
}

impl<S: AsyncRecordStore> RequestHandler for AsyncRequestHandler<S> {
    fn handle(&self, request: Request) -> Response {
        self.runtime.block_on(self.dispatch(request))
    }
}
