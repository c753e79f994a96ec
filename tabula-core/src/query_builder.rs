use crate::{
    AsValue, Error, Executor, GenericSqlWriter, Result, Row, Rows, SqlWriter, Statement, Table,
    Value, separated_by,
};

/// Builds a positional argument list, one [`Value`] per field.
///
/// Absent entries (`Value::Null`, `None`) leave the matching field out of the
/// statement, they never mean "is NULL".
///
/// ```rust
/// use tabula_core::{Value, args};
/// let args = args![Value::Null, "x", 5];
/// assert!(args[0].is_null());
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        [$($crate::Value::from($value)),*]
    };
}

/// Deferred `UPDATE` bound to a `WHERE` clause, see [`Table::update`].
#[derive(Debug, Clone)]
pub struct Setter<'t> {
    table: &'t Table,
    where_sql: String,
    args: Vec<Value>,
}

impl<'t> Setter<'t> {
    /// `UPDATE ... SET ... WHERE ...`, the SET arguments come before the WHERE ones.
    pub fn statement(&self, values: &[Value]) -> Result<Statement> {
        check_arity(self.table, values)?;
        let mut sql = String::with_capacity(128);
        sql.push_str(self.table.sql_update());
        sql.push_str(" SET ");
        let mut args =
            GenericSqlWriter.write_predicates(&mut sql, self.table, values, ", ");
        if args.is_empty() {
            return Err(empty_predicate("assign", self.table));
        }
        sql.push(' ');
        sql.push_str(&self.where_sql);
        args.extend(self.args.iter().cloned());
        Ok(Statement::new(sql, args))
    }

    /// Assigns every present value to its field and returns the rows affected.
    pub async fn assign(&self, executor: &mut impl Executor, values: &[Value]) -> Result<u64> {
        let statement = self.statement(values)?;
        log::debug!("{}", statement);
        Ok(executor.execute(statement).await?.rows_affected)
    }
}

fn check_arity(table: &Table, args: &[Value]) -> Result<()> {
    if args.len() > table.len() {
        let error = Error::ShapeMismatch {
            table: table.name().into(),
            what: "positional arguments",
            expected: table.len(),
            actual: args.len(),
        };
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(())
}

fn empty_predicate(operation: &'static str, table: &Table) -> Error {
    let error = Error::EmptyPredicate {
        operation,
        table: table.name().into(),
    };
    log::error!("{:#}", error);
    error
}

impl Table {
    /// `WHERE` clause from the present arguments, rejected when none is present.
    fn write_where(
        &self,
        out: &mut String,
        operation: &'static str,
        args: &[Value],
        joiner: &str,
    ) -> Result<Vec<Value>> {
        check_arity(self, args)?;
        out.push_str("WHERE ");
        let bound = GenericSqlWriter.write_predicates(out, self, args, joiner);
        if bound.is_empty() {
            return Err(empty_predicate(operation, self));
        }
        Ok(bound)
    }

    fn select_statement(
        &self,
        operation: &'static str,
        args: &[Value],
        joiner: &str,
        limit_one: bool,
    ) -> Result<Statement> {
        let mut sql = String::with_capacity(128);
        sql.push_str(self.sql_select());
        sql.push(' ');
        let args = self.write_where(&mut sql, operation, args, joiner)?;
        if limit_one {
            sql.push_str(" LIMIT 1");
        }
        Ok(Statement::new(sql, args))
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)` over the present values.
    pub fn insert_statement(&self, values: &[Value]) -> Result<Statement> {
        check_arity(self, values)?;
        let mut sql = String::with_capacity(128);
        sql.push_str(self.sql_insert());
        sql.push_str(" (");
        let present = self
            .fields()
            .iter()
            .zip(values)
            .filter(|(_, v)| !v.is_null())
            .collect::<Vec<_>>();
        separated_by(
            &mut sql,
            present.iter(),
            |out, (field, _)| out.push_str(&field.qualified_name),
            ", ",
        );
        sql.push_str(") VALUES (");
        separated_by(
            &mut sql,
            &self.placeholders()[..present.len()],
            |out, v| out.push_str(v),
            ", ",
        );
        sql.push(')');
        let args = present.into_iter().map(|(_, v)| v.clone()).collect();
        Ok(Statement::new(sql, args))
    }

    /// AND-joined lookup limited to one row.
    pub fn get_statement(&self, args: &[Value]) -> Result<Statement> {
        self.select_statement("get", args, " AND ", true)
    }

    pub fn get_many_statement(&self, args: &[Value]) -> Result<Statement> {
        self.select_statement("get_many", args, " AND ", false)
    }

    /// OR-joined lookup limited to one row.
    pub fn find_statement(&self, args: &[Value]) -> Result<Statement> {
        self.select_statement("find", args, " OR ", true)
    }

    pub fn find_many_statement(&self, args: &[Value]) -> Result<Statement> {
        self.select_statement("find_many", args, " OR ", false)
    }

    pub fn delete_statement(&self, args: &[Value]) -> Result<Statement> {
        let mut sql = String::with_capacity(128);
        sql.push_str(self.sql_delete());
        sql.push(' ');
        let args = self.write_where(&mut sql, "del", args, " AND ")?;
        sql.push_str(" LIMIT 1");
        Ok(Statement::new(sql, args))
    }

    pub fn count_statement(&self) -> Statement {
        Statement::new(self.sql_count(), Vec::new())
    }

    pub fn count_by_statement(&self, args: &[Value]) -> Result<Statement> {
        let mut sql = String::with_capacity(128);
        sql.push_str(self.sql_count());
        sql.push(' ');
        let args = self.write_where(&mut sql, "count_by", args, " AND ")?;
        Ok(Statement::new(sql, args))
    }

    /// Page of `take` rows after skipping `skip`, ordered by primary key.
    pub fn list_statement(&self, take: u32, skip: u32, descending: bool) -> Statement {
        let sql = format!(
            "{} ORDER BY {}{} LIMIT ?, ?",
            self.sql_select(),
            self.order_column(),
            if descending { " DESC" } else { "" },
        );
        Statement::new(sql, vec![skip.as_value(), take.as_value()])
    }

    /// The canonical select followed by `suffix`, which is appended as it is.
    pub fn query_statement(&self, suffix: &str, args: Vec<Value>) -> Statement {
        Statement::new(format!("{} {}", self.sql_select(), suffix), args)
    }

    /// Inserts the present values and returns the generated identifier.
    pub async fn add(&self, executor: &mut impl Executor, values: &[Value]) -> Result<Option<i64>> {
        let statement = self.insert_statement(values)?;
        log::debug!("{}", statement);
        Ok(executor.execute(statement).await?.last_affected_id)
    }

    /// Deletes at most one row matching every present argument.
    pub async fn del(&self, executor: &mut impl Executor, args: &[Value]) -> Result<u64> {
        let statement = self.delete_statement(args)?;
        log::debug!("{}", statement);
        Ok(executor.execute(statement).await?.rows_affected)
    }

    async fn fetch_one<'t>(
        &'t self,
        executor: &mut impl Executor,
        statement: Statement,
    ) -> Result<Option<Row<'t>>> {
        log::debug!("{}", statement);
        executor
            .run_one(statement)
            .await?
            .map(|row| Row::new(self, row))
            .transpose()
    }

    fn fetch_many<'a, E: Executor>(&'a self, executor: &'a mut E, statement: Statement) -> Rows<'a> {
        log::debug!("{}", statement);
        Rows::new(self, executor.run(statement))
    }

    /// First row matching every present argument.
    pub async fn get<'t>(
        &'t self,
        executor: &mut impl Executor,
        args: &[Value],
    ) -> Result<Option<Row<'t>>> {
        let statement = self.get_statement(args)?;
        self.fetch_one(executor, statement).await
    }

    /// Every row matching every present argument.
    pub fn get_many<'a, E: Executor>(&'a self, executor: &'a mut E, args: &[Value]) -> Result<Rows<'a>> {
        let statement = self.get_many_statement(args)?;
        Ok(self.fetch_many(executor, statement))
    }

    /// First row matching any present argument.
    pub async fn find<'t>(
        &'t self,
        executor: &mut impl Executor,
        args: &[Value],
    ) -> Result<Option<Row<'t>>> {
        let statement = self.find_statement(args)?;
        self.fetch_one(executor, statement).await
    }

    /// Every row matching any present argument.
    pub fn find_many<'a, E: Executor>(&'a self, executor: &'a mut E, args: &[Value]) -> Result<Rows<'a>> {
        let statement = self.find_many_statement(args)?;
        Ok(self.fetch_many(executor, statement))
    }

    pub fn list<'a, E: Executor>(&'a self, executor: &'a mut E, take: u32, skip: u32) -> Rows<'a> {
        self.fetch_many(executor, self.list_statement(take, skip, false))
    }

    pub fn list_desc<'a, E: Executor>(&'a self, executor: &'a mut E, take: u32, skip: u32) -> Rows<'a> {
        self.fetch_many(executor, self.list_statement(take, skip, true))
    }

    /// Update of at most one row matching every present argument.
    pub fn update(&self, args: &[Value]) -> Result<Setter<'_>> {
        self.setter("update", args, true)
    }

    /// Update of every row matching every present argument.
    pub fn update_many(&self, args: &[Value]) -> Result<Setter<'_>> {
        self.setter("update_many", args, false)
    }

    fn setter(&self, operation: &'static str, args: &[Value], limit_one: bool) -> Result<Setter<'_>> {
        let mut where_sql = String::with_capacity(64);
        let args = self.write_where(&mut where_sql, operation, args, " AND ")?;
        if limit_one {
            where_sql.push_str(" LIMIT 1");
        }
        Ok(Setter {
            table: self,
            where_sql,
            args,
        })
    }

    pub async fn count(&self, executor: &mut impl Executor) -> Result<i64> {
        self.fetch_count(executor, self.count_statement()).await
    }

    pub async fn count_by(&self, executor: &mut impl Executor, args: &[Value]) -> Result<i64> {
        let statement = self.count_by_statement(args)?;
        self.fetch_count(executor, statement).await
    }

    async fn fetch_count(&self, executor: &mut impl Executor, statement: Statement) -> Result<i64> {
        log::debug!("{}", statement);
        let row = executor.run_one(statement).await?.ok_or(Error::NoRows)?;
        let value = row.values.into_vec().into_iter().next().ok_or(Error::NoRows)?;
        i64::try_from_value(value)
    }

    /// Rows of the canonical select narrowed by a caller supplied `suffix`.
    ///
    /// `suffix` is not escaped and `args` are bound as they are, NULLs included.
    pub fn query<'a, E: Executor>(
        &'a self,
        executor: &'a mut E,
        suffix: &str,
        args: Vec<Value>,
    ) -> Rows<'a> {
        self.fetch_many(executor, self.query_statement(suffix, args))
    }

    /// First row of [`Table::query`].
    pub async fn query_row<'t>(
        &'t self,
        executor: &mut impl Executor,
        suffix: &str,
        args: Vec<Value>,
    ) -> Result<Option<Row<'t>>> {
        let statement = self.query_statement(suffix, args);
        self.fetch_one(executor, statement).await
    }
}
