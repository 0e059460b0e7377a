//! Synchronous request handler
//!
//! Serves each request on the calling thread through a [`LedgerEngine`].
//! The engine's writer gate makes a shared handler safe to call from many
//! threads at once.

use crate::adapter::{Request, RequestHandler, Response, ResponseBody, Status};
use crate::core::{LedgerEngine, RecordStore};
use crate::io::FileRecordStore;

/// Synchronous request handler
///
/// Generic over the store so tests can run it against
/// [`MemoryRecordStore`](crate::io::MemoryRecordStore).
pub struct SyncRequestHandler<S = FileRecordStore> {
    engine: LedgerEngine<S>,
}

impl<S: RecordStore> SyncRequestHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            engine: LedgerEngine::new(store),
        }
    }

    pub fn engine(&self) -> &LedgerEngine<S> {
        &self.engine
    }
}

impl<S: RecordStore> RequestHandler for SyncRequestHandler<S> {
    fn handle(&self, request: Request) -> Response {
        let engine = &self.engine;

        match request {
            Request::ListAccounts => {
                Response::from_result(engine.list_accounts(), Status::Ok, ResponseBody::Accounts)
            }
            Request::GetAccount { id } => {
                Response::from_result(engine.get_account(&id), Status::Ok, ResponseBody::Account)
            }
            Request::CreateAccount(request) => Response::from_result(
                engine.create_account(request),
                Status::Created,
                ResponseBody::Account,
            ),
            Request::Deposit(request) => {
                Response::from_result(engine.deposit(request), Status::Ok, ResponseBody::Account)
            }
            Request::SetCredit(request) => {
                Response::from_result(engine.set_credit(request), Status::Ok, ResponseBody::Account)
            }
            Request::Transfer(request) => {
                Response::from_result(engine.transfer(request), Status::Ok, |receipt| {
                    ResponseBody::Accounts(receipt.into_pair())
                })
            }
            Request::DeleteAccount { id } => Response::from_result(
                engine.delete_account(&id),
                Status::Ok,
                ResponseBody::Message,
            ),
            Request::FilterByCash { threshold } => Response::from_result(
                engine.filter_by_cash(threshold),
                Status::Ok,
                ResponseBody::Accounts,
            ),
        }
    }
}
