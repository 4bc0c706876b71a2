//! Scripted in-memory channel for unit tests
//!
//! Replies are registered per (method, OID) and consumed in order; the last
//! registered reply is sticky so repeated reads keep answering. Every call is
//! recorded for assertions on call counts and ordering.

use crate::error::Result;
use crate::transport::{status_error, Payload, RestChannel};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Payload),
    Status(u16),
}

#[derive(Default)]
pub(crate) struct FakeChannel {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<(Method, String)>>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, method: Method, oid: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, oid.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn on_get(&self, oid: &str, reply: Payload) {
        self.register(Method::Get, oid, Reply::Json(reply));
    }

    pub fn on_get_status(&self, oid: &str, status: u16) {
        self.register(Method::Get, oid, Reply::Status(status));
    }

    pub fn on_post(&self, oid: &str, reply: Payload) {
        self.register(Method::Post, oid, Reply::Json(reply));
    }

    pub fn on_post_status(&self, oid: &str, status: u16) {
        self.register(Method::Post, oid, Reply::Status(status));
    }

    pub fn on_put(&self, oid: &str, reply: Payload) {
        self.register(Method::Put, oid, Reply::Json(reply));
    }

    pub fn on_put_status(&self, oid: &str, status: u16) {
        self.register(Method::Put, oid, Reply::Status(status));
    }

    pub fn on_delete_ok(&self, oid: &str) {
        self.register(Method::Delete, oid, Reply::Json(Value::Null));
    }

    pub fn on_delete_status(&self, oid: &str, status: u16) {
        self.register(Method::Delete, oid, Reply::Status(status));
    }

    /// All calls issued so far, in order
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls with the given method whose OID contains `fragment`
    pub fn count(&self, method: Method, fragment: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, oid)| *m == method && oid.contains(fragment))
            .count()
    }

    fn reply(&self, method: Method, oid: &str) -> Result<Payload> {
        self.calls.lock().unwrap().push((method, oid.to_string()));

        let mut replies = self.replies.lock().unwrap();
        let queue = replies
            .get_mut(&(method, oid.to_string()))
            .unwrap_or_else(|| panic!("no reply registered for {:?} {}", method, oid));

        let reply = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap_or_else(|| panic!("no reply left for {:?} {}", method, oid))
        };

        match reply {
            Reply::Json(value) => Ok(value),
            Reply::Status(status) => Err(status_error(oid, status)),
        }
    }
}

#[async_trait]
impl RestChannel for FakeChannel {
    async fn get(&self, oid: &str) -> Result<Payload> {
        self.reply(Method::Get, oid)
    }

    async fn post(&self, oid: &str, _body: Payload) -> Result<Payload> {
        self.reply(Method::Post, oid)
    }

    async fn put(&self, oid: &str, _body: Payload) -> Result<Payload> {
        self.reply(Method::Put, oid)
    }

    async fn delete(&self, oid: &str) -> Result<()> {
        self.reply(Method::Delete, oid).map(|_| ())
    }
}
