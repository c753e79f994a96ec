use crate::{RowWrap, ValueWrap};
use async_stream::try_stream;
use mysql_async::{Conn, Opts, Params, prelude::Queryable};
use std::sync::Arc;
use tabula_core::{
    ConnectOptions, Connection, Context, Error, Executor, GenericSqlWriter, Result, RowLabeled,
    RowsAffected, SqlWriter, Statement, Value,
    stream::{Stream, StreamExt, TryStreamExt},
};

/// MySQL connection backed by `mysql_async`.
pub struct MySQLConnection {
    pub(crate) connection: Conn,
    pub(crate) database: String,
}

fn params(args: Vec<Value>) -> Result<Params> {
    if args.is_empty() {
        return Ok(Params::Empty);
    }
    Ok(Params::Positional(
        args.into_iter()
            .map(|v| mysql_async::Value::try_from(ValueWrap(v)))
            .collect::<Result<_>>()?,
    ))
}

fn with_context(error: Error, context: Arc<String>) -> Error {
    let error = match error {
        Error::Execution(e) => Error::Execution(e.context(context)),
        e => e,
    };
    log::error!("{:#}", error);
    error
}

impl Executor for MySQLConnection {
    fn run(&mut self, statement: Statement) -> impl Stream<Item = Result<RowLabeled>> + Send {
        let context = Arc::new(format!("While running the query:\n{}", statement));
        let Statement { sql, args } = statement;
        try_stream! {
            let params = params(args)?;
            let mut stream = self
                .connection
                .exec_stream::<RowWrap, _, _>(sql, params)
                .await
                .map_err(anyhow::Error::from)?;
            while let Some(row) = stream.next().await.transpose().map_err(anyhow::Error::from)? {
                yield row.0
            }
        }
        .map_err(move |e: Error| with_context(e, context.clone()))
    }

    async fn execute(&mut self, statement: Statement) -> Result<RowsAffected> {
        let context = Arc::new(format!("While executing the statement:\n{}", statement));
        let Statement { sql, args } = statement;
        let params = params(args).map_err(|e| with_context(e, context.clone()))?;
        self.connection
            .exec_drop(sql, params)
            .await
            .map_err(|e| with_context(anyhow::Error::from(e).into(), context))?;
        Ok(RowsAffected {
            rows_affected: self.connection.affected_rows(),
            last_affected_id: self.connection.last_insert_id().map(|v| v as i64),
        })
    }
}

impl Connection for MySQLConnection {
    async fn connect(options: &ConnectOptions) -> Result<MySQLConnection> {
        let context = || format!("While trying to connect to `{}`", options);
        let url = options.url()?;
        let opts = Opts::from_url(url.as_str()).with_context(context).map_err(|e| {
            let error = Error::Configuration(format!("{:#}", e));
            log::error!("{:#}", error);
            error
        })?;
        let connection = Conn::new(opts).await.with_context(context).map_err(|e| {
            let error = Error::Configuration(format!("{:#}", e));
            log::error!("{:#}", error);
            error
        })?;
        let mut result = MySQLConnection {
            connection,
            database: options.database.clone(),
        };
        result.ping().await?;
        log::debug!("Connected to {}", options);
        Ok(result)
    }

    async fn ping(&mut self) -> Result<()> {
        self.connection.ping().await.map_err(|e| {
            let error = Error::Configuration(format!("The ping to the server failed: {e}"));
            log::error!("{:#}", error);
            error
        })
    }

    fn database(&self) -> &str {
        &self.database
    }

    async fn use_database(&mut self, database: &str) -> Result<()> {
        let mut sql = String::from("USE ");
        GenericSqlWriter.write_identifier_quoted(&mut sql, database);
        log::debug!("{}", sql);
        self.connection
            .query_drop(sql)
            .await
            .map_err(|e| {
                let context = format!("While switching to the database `{}`", database);
                with_context(anyhow::Error::from(e).into(), Arc::new(context))
            })?;
        self.database = database.into();
        Ok(())
    }
}
