use crate::{
    Result, RowLabeled, RowsAffected, Statement,
    stream::{Stream, StreamExt},
};
use std::{future::Future, pin::pin};

/// The execution collaborator: runs SQL against a backend.
///
/// Errors coming from the backend are returned as [`crate::Error::Execution`]
/// and never retried.
pub trait Executor: Send {
    /// Runs a statement and streams back the rows it produces.
    fn run(&mut self, statement: Statement) -> impl Stream<Item = Result<RowLabeled>> + Send;

    /// Runs a statement and returns only its first row.
    fn run_one(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<Option<RowLabeled>>> + Send {
        let stream = self.run(statement);
        async move {
            let mut stream = pin!(stream);
            stream.next().await.transpose()
        }
    }

    /// Runs a modify statement and returns what it affected.
    fn execute(&mut self, statement: Statement)
    -> impl Future<Output = Result<RowsAffected>> + Send;
}
