use crate::{
    AsValue, ConnectOptions, Error, Executor, Result, Statement,
    stream::{StreamExt, TryStreamExt},
};
use std::future::Future;

/// A live handle to a database, passed explicitly to every catalog load and
/// every table operation.
pub trait Connection: Executor + Sized {
    /// Opens the connection and verifies it with a ping.
    fn connect(options: &ConnectOptions) -> impl Future<Output = Result<Self>>;

    fn ping(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Name of the active database, the schema that tables are loaded from.
    fn database(&self) -> &str;

    /// Switches the active database.
    fn use_database(&mut self, database: &str) -> impl Future<Output = Result<()>> + Send;

    /// Names of the tables in the active database, in the order the server lists them.
    fn show_tables(&mut self) -> impl Future<Output = Result<Vec<String>>> + Send {
        self.run(Statement::from("SHOW TABLES"))
            .map(|row| {
                let row = row?;
                let value = row.values.into_vec().into_iter().next().ok_or(Error::NoRows)?;
                String::try_from_value(value)
            })
            .try_collect()
    }
}
