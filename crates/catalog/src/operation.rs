use {
    minab_common::{Error, Result},
    serde_json::{Map, Value},
};

/// Whether an operation reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// How a declared variable is filled in.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Must be supplied by the caller; dispatch fails fast without it.
    Required,
    /// May be omitted; the backend sees no value.
    Optional,
    /// May be omitted; this value is substituted before dispatch.
    Default(Value),
}

/// A declared operation variable.
#[derive(Debug, Clone)]
pub struct VarSpec {
    pub name: &'static str,
    /// GraphQL type as written in the document, e.g. `Int!` or `[String!]!`.
    pub gql_type: &'static str,
    pub requirement: Requirement,
}

impl VarSpec {
    pub fn required(name: &'static str, gql_type: &'static str) -> Self {
        Self {
            name,
            gql_type,
            requirement: Requirement::Required,
        }
    }

    pub fn optional(name: &'static str, gql_type: &'static str) -> Self {
        Self {
            name,
            gql_type,
            requirement: Requirement::Optional,
        }
    }

    pub fn with_default(name: &'static str, gql_type: &'static str, default: Value) -> Self {
        Self {
            name,
            gql_type,
            requirement: Requirement::Default(default),
        }
    }
}

/// A named, immutable unit of work against the graph backend.
///
/// Operations are looked up from the closed [`Catalog`](crate::Catalog) by
/// name; they are never constructed from user input.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: &'static str,
    pub kind: OperationKind,
    /// The full GraphQL document sent on the wire.
    pub document: &'static str,
    pub variables: Vec<VarSpec>,
    /// `false` for placeholder entries whose logical action is served by the
    /// secondary service. They stay registered so references to them stay
    /// valid, but the graph transport refuses to send them.
    pub dispatchable: bool,
}

impl Operation {
    /// Validate caller-supplied variables against the declared specs.
    ///
    /// Fails before any network activity when a required variable is missing
    /// (or explicitly `null`) or when an undeclared variable is supplied.
    /// Declared defaults are filled in; optional variables may stay absent.
    pub fn build_variables(&self, supplied: Value) -> Result<Map<String, Value>> {
        let supplied = match supplied {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::invalid_input(format!(
                    "variables for `{}` must be an object, got {other}",
                    self.name
                )));
            },
        };

        for key in supplied.keys() {
            if !self.variables.iter().any(|spec| spec.name == key) {
                return Err(Error::invalid_input(format!(
                    "unknown variable `{key}` for operation `{}`",
                    self.name
                )));
            }
        }

        let mut out = Map::new();
        for spec in &self.variables {
            match supplied.get(spec.name) {
                Some(value) if !value.is_null() => {
                    out.insert(spec.name.to_string(), value.clone());
                },
                // Explicit null counts as absent.
                _ => match &spec.requirement {
                    Requirement::Required => {
                        return Err(Error::MissingVariable {
                            operation: self.name.to_string(),
                            name: spec.name.to_string(),
                        });
                    },
                    Requirement::Default(default) => {
                        out.insert(spec.name.to_string(), default.clone());
                    },
                    Requirement::Optional => {},
                },
            }
        }

        Ok(out)
    }
}
