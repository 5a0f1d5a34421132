use crate::stmt::Type;

/// A database storage type, as reported by catalog introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Numeric,
    Char,
    VarChar,
    Text,
    Blob,
    Uuid,
    Date,
    Time,

    /// Date and time without a time zone.
    Timestamp,

    /// Date and time with a time zone.
    TimestampTz,

    /// A native array of the element type.
    Array(Box<SqlType>),

    /// A type rowbind does not know about. Values bind and read as-is.
    Other(String),
}

impl SqlType {
    pub fn array(element: SqlType) -> SqlType {
        SqlType::Array(Box::new(element))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SqlType::Array(_))
    }

    /// Returns the element type when `self` is an array.
    pub fn element(&self) -> Option<&SqlType> {
        match self {
            SqlType::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The host type values of this column are coerced to before binding.
    pub fn host_type(&self) -> Type {
        match self {
            SqlType::Boolean => Type::Bool,
            SqlType::SmallInt => Type::I16,
            SqlType::Integer => Type::I32,
            SqlType::BigInt => Type::I64,
            SqlType::Real => Type::F32,
            SqlType::Double => Type::F64,
            // Exact decimals keep their value; drivers encode them natively
            SqlType::Numeric => Type::Any,
            SqlType::Char | SqlType::VarChar | SqlType::Text => Type::String,
            SqlType::Blob => Type::Bytes,
            SqlType::Uuid => Type::Uuid,
            SqlType::Date => Type::Date,
            SqlType::Time => Type::Time,
            SqlType::Timestamp => Type::DateTime,
            SqlType::TimestampTz => Type::Timestamp,
            SqlType::Array(element) => Type::list(element.host_type()),
            SqlType::Other(_) => Type::Any,
        }
    }

    /// Parses a SQL type name such as `varchar(255)`, `timestamp with time zone`
    /// or `integer[]`. Unknown names map to [`SqlType::Other`].
    pub fn parse(name: &str) -> SqlType {
        let normalized = name.trim().to_lowercase();

        if let Some(element) = normalized.strip_suffix("[]") {
            return SqlType::array(SqlType::parse(element));
        }

        // Strip length and precision modifiers: `varchar(255)`, `numeric(10, 2)`
        let base = match normalized.find('(') {
            Some(pos) => {
                let (head, tail) = normalized.split_at(pos);
                let rest = tail.find(')').map(|end| &tail[end + 1..]).unwrap_or("");
                format!("{}{}", head.trim_end(), rest)
            }
            None => normalized.clone(),
        };

        match base.trim() {
            "bool" | "boolean" => SqlType::Boolean,
            "int2" | "smallint" | "smallserial" => SqlType::SmallInt,
            "int" | "int4" | "integer" | "serial" | "mediumint" => SqlType::Integer,
            "int8" | "bigint" | "bigserial" => SqlType::BigInt,
            "real" | "float4" => SqlType::Real,
            "float" | "float8" | "double" | "double precision" => SqlType::Double,
            "numeric" | "decimal" => SqlType::Numeric,
            "char" | "character" | "bpchar" | "nchar" => SqlType::Char,
            "varchar" | "character varying" | "nvarchar" => SqlType::VarChar,
            "text" | "clob" | "name" | "citext" => SqlType::Text,
            "blob" | "bytea" => SqlType::Blob,
            "uuid" => SqlType::Uuid,
            "date" => SqlType::Date,
            "time" | "time without time zone" => SqlType::Time,
            "timestamp" | "timestamp without time zone" | "datetime" => SqlType::Timestamp,
            "timestamptz" | "timestamp with time zone" => SqlType::TimestampTz,
            // PostgreSQL reports array element types with a leading underscore
            other if other.starts_with('_') => SqlType::array(SqlType::parse(&other[1..])),
            _ => SqlType::Other(name.trim().to_string()),
        }
    }
}
