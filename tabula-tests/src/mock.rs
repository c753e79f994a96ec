use std::{
    collections::VecDeque,
    future::{self, Future},
    sync::Arc,
};
use tabula::{
    ConnectOptions, Connection, Executor, Result, RowLabeled, RowNames, RowsAffected, Statement,
    Value, stream::{self, Stream},
};

/// In memory executor: records every statement and replays queued results.
///
/// Each `run` pops the next queued row set (none left means no rows), each
/// `execute` pops the next queued [`RowsAffected`] (none left means the default).
#[derive(Default, Debug)]
pub struct MockExecutor {
    pub statements: Vec<Statement>,
    pub database: String,
    results: VecDeque<Vec<RowLabeled>>,
    affected: VecDeque<RowsAffected>,
}

impl MockExecutor {
    pub fn new(database: &str) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    /// Queues the rows returned by the next `run`.
    pub fn with_rows(mut self, labels: &[&str], rows: Vec<Vec<Value>>) -> Self {
        self.push_rows(labels, rows);
        self
    }

    pub fn push_rows(&mut self, labels: &[&str], rows: Vec<Vec<Value>>) {
        let labels: RowNames = labels.iter().map(|v| v.to_string()).collect::<Arc<[_]>>();
        self.results.push_back(
            rows.into_iter()
                .map(|v| RowLabeled::new(labels.clone(), v.into_boxed_slice()))
                .collect(),
        );
    }

    /// Queues the outcome of the next `execute`.
    pub fn with_affected(mut self, rows_affected: u64, last_affected_id: Option<i64>) -> Self {
        self.affected.push_back(RowsAffected {
            rows_affected,
            last_affected_id,
        });
        self
    }

    pub fn last(&self) -> Option<&Statement> {
        self.statements.last()
    }
}

impl Executor for MockExecutor {
    fn run(&mut self, statement: Statement) -> impl Stream<Item = Result<RowLabeled>> + Send {
        log::debug!("mock run: {}", statement);
        self.statements.push(statement);
        let rows = self.results.pop_front().unwrap_or_default();
        stream::iter(rows.into_iter().map(Ok))
    }

    fn execute(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        log::debug!("mock execute: {}", statement);
        self.statements.push(statement);
        future::ready(Ok(self.affected.pop_front().unwrap_or_default()))
    }
}

impl Connection for MockExecutor {
    async fn connect(options: &ConnectOptions) -> Result<Self> {
        Ok(MockExecutor::new(&options.database))
    }

    async fn ping(&mut self) -> Result<()> {
        Ok(())
    }

    fn database(&self) -> &str {
        &self.database
    }

    async fn use_database(&mut self, database: &str) -> Result<()> {
        self.database = database.into();
        Ok(())
    }
}
