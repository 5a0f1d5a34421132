use super::{ident::Literal, Comma, Delimited, Ident, Params, Period, ToSql};

use crate::stmt::{self, Statement};

/// A column bound to the next placeholder: `"name"`.
struct Bind<'a>(&'a str);

/// `"name" = $n`
struct Equals<'a>(&'a str);

/// `alias.*`
struct AllColumns<'a>(&'a str);

impl ToSql for AllColumns<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, self.0 ".*");
    }
}

impl ToSql for Bind<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let placeholder = f.params.push(self.0);
        fmt!(f, placeholder);
    }
}

impl ToSql for Equals<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Ident(self.0) " = " Bind(self.0));
    }
}

impl ToSql for &stmt::TableName {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let parts = Period(self.schema.iter().chain(Some(&self.name)).map(Ident));
        fmt!(f, parts);
    }
}

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::JoinedSelect(stmt) => stmt.to_sql(f),
            Statement::NextVal(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        fmt!(f, "INSERT INTO " table);

        if self.columns.is_empty() {
            fmt!(f, " DEFAULT VALUES");
        } else {
            let columns = Comma(self.columns.iter().map(Ident));
            let values = Comma(self.columns.iter().map(|column| Bind(column)));
            fmt!(f, " (" columns ") VALUES (" values ")");
        }

        if !self.returning.is_empty() {
            let returning = Comma(self.returning.iter().map(Ident));
            fmt!(f, " RETURNING " returning);
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let assignments = Comma(self.assignments.iter().map(|column| Equals(column)));
        let filter = Delimited(self.filter.iter().map(|column| Equals(column)), " AND ");

        let table = &self.table;
        fmt!(f, "UPDATE " table " SET " assignments " WHERE " filter);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let filter = Delimited(self.filter.iter().map(|column| Equals(column)), " AND ");

        let table = &self.from;
        fmt!(f, "DELETE FROM " table " WHERE " filter);
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.from;
        fmt!(f, "SELECT * FROM " table);

        let clause = self.clause.trim();
        if !clause.is_empty() {
            fmt!(f, " " clause);
        }
    }
}

/// `"schema"."table" AS alias`
impl ToSql for &stmt::Aliased {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        let alias = &self.alias;
        fmt!(f, table " AS " alias);
    }
}

impl ToSql for &stmt::JoinedSelect {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let aliases = Some(&self.from)
            .into_iter()
            .chain(self.joins.iter().map(|join| &join.table))
            .map(|table| AllColumns(&table.alias));

        let from = &self.from;
        fmt!(f, "SELECT " Comma(aliases) " FROM " from);

        for join in &self.joins {
            let table = &join.table;
            fmt!(f, " JOIN " table " ON (" join.on.trim() ")");
        }

        let clause = self.clause.trim();
        if !clause.is_empty() {
            fmt!(f, " " clause);
        }
    }
}

impl ToSql for &stmt::NextVal {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let sequence = self.sequence.to_string();
        fmt!(f, "SELECT nextval(" Literal(sequence) ")");
    }
}
