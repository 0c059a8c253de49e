#![allow(dead_code)]

use log::LevelFilter;
use skiff::{
    Connection, ConnectionOptions, Engine, Error, Packet, Result, ResultSet, Row, RowNames,
    RowsAffected, Value,
    stream::{self, Stream},
};
use std::{
    collections::VecDeque,
    env,
    sync::{Arc, Mutex},
};

/// Marker the mock engine appends to its log when the handle is released.
pub const CLOSED: &str = "--engine closed--";

pub type SqlLog = Arc<Mutex<Vec<String>>>;
pub type Replies = Arc<Mutex<VecDeque<Reply>>>;

/// Scripted outcome for the next engine dispatch.
pub enum Reply {
    Sets(Vec<ResultSet>),
    Packets(Vec<Packet>),
    PacketsThenFail(Vec<Packet>, &'static str),
    Affected(RowsAffected),
    Fail(&'static str),
}

/// Engine double driven by a reply queue. Every dispatch is recorded in the
/// log; an unscripted dispatch succeeds with an empty outcome. Connecting
/// fails when the connection string names an unreachable server or carries
/// the wrong password.
#[derive(Default)]
pub struct MockEngine {
    log: SqlLog,
    replies: Replies,
}

impl MockEngine {
    pub fn handles(&self) -> (SqlLog, Replies) {
        (self.log.clone(), self.replies.clone())
    }
}

impl Engine for MockEngine {
    async fn connect(target: &str) -> Result<Self> {
        if target.contains("unreachable") || target.contains("pwd=wrong;") {
            return Err(Error::msg("access denied"));
        }
        Ok(Self::default())
    }

    async fn close(self) -> Result<()> {
        self.log.lock().unwrap().push(CLOSED.to_owned());
        Ok(())
    }

    async fn query(&mut self, sql: &str) -> Result<Vec<ResultSet>> {
        self.log.lock().unwrap().push(sql.to_owned());
        match self.replies.lock().unwrap().pop_front() {
            None => Ok(vec![ResultSet::default()]),
            Some(Reply::Sets(sets)) => Ok(sets),
            Some(Reply::Fail(message)) => Err(Error::msg(message)),
            Some(_) => panic!("query dispatched over a reply scripted for another mode"),
        }
    }

    fn stream(
        &mut self,
        sql: &str,
        _packet_size: usize,
    ) -> impl Stream<Item = Result<Packet>> + Send {
        self.log.lock().unwrap().push(sql.to_owned());
        let items: Vec<Result<Packet>> = match self.replies.lock().unwrap().pop_front() {
            None => Vec::new(),
            Some(Reply::Packets(packets)) => packets.into_iter().map(Ok).collect(),
            Some(Reply::PacketsThenFail(packets, message)) => packets
                .into_iter()
                .map(Ok)
                .chain([Err(Error::msg(message))])
                .collect(),
            Some(Reply::Fail(message)) => vec![Err(Error::msg(message))],
            Some(_) => panic!("stream dispatched over a reply scripted for another mode"),
        };
        stream::iter(items)
    }

    async fn execute(&mut self, sql: &str) -> Result<RowsAffected> {
        self.log.lock().unwrap().push(sql.to_owned());
        match self.replies.lock().unwrap().pop_front() {
            None => Ok(RowsAffected::default()),
            Some(Reply::Affected(affected)) => Ok(affected),
            Some(Reply::Fail(message)) => Err(Error::msg(message)),
            Some(_) => panic!("execute dispatched over a reply scripted for another mode"),
        }
    }
}

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger.is_test(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub fn options() -> ConnectionOptions {
    ConnectionOptions::new("db.test.local", "helpdesk").credentials("app", "secret")
}

/// An open connection over a scripted engine, with the handles to script it.
pub fn connected() -> (Connection<MockEngine>, SqlLog, Replies) {
    init_logs();
    let engine = MockEngine::default();
    let (log, replies) = engine.handles();
    (Connection::from_engine(options(), engine), log, replies)
}

pub fn push(replies: &Replies, reply: Reply) {
    replies.lock().unwrap().push_back(reply);
}

pub fn logged(log: &SqlLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn names(columns: &[&str]) -> RowNames {
    columns.iter().map(|c| c.to_string()).collect()
}

pub fn row(values: Vec<Value>) -> Row {
    values.into_boxed_slice()
}

pub fn set(columns: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
    ResultSet::new(names(columns), rows.into_iter().map(row).collect())
}
