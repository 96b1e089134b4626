use crate::schema::Schema;

/// What happens when `@string` defines a name a second time.
/// Either way, a [`Diagnostic::StringRedefinition`](crate::Diagnostic) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedefinitionPolicy {
    /// the last definition wins
    #[default]
    Overwrite,
    /// the first definition wins
    KeepFirst,
}

/// Settings for processing one [`Document`](crate::Document)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub redefinition: RedefinitionPolicy,
    pub schema: Schema,
}

impl Config {
    pub fn new() -> Config {
        Config::default()
    }

    pub fn with_redefinition(mut self, policy: RedefinitionPolicy) -> Config {
        self.redefinition = policy;
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Config {
        self.schema = schema;
        self
    }
}
