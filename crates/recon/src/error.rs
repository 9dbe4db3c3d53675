use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// The model's feature schema is empty or unavailable.
    EmptySchema,
    /// TOML parse / deserialization error in a policy file.
    PolicyParse(String),
    /// Policy validation error (missing catch-all, duplicate override, etc.).
    PolicyValidation(String),
    /// A CSV cell could not be parsed as a numeric feature value.
    ValueParse { row: usize, column: String, value: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySchema => write!(f, "feature schema is empty"),
            Self::PolicyParse(msg) => write!(f, "policy parse error: {msg}"),
            Self::PolicyValidation(msg) => write!(f, "policy validation error: {msg}"),
            Self::ValueParse { row, column, value } => {
                write!(f, "row {row}, column '{column}': cannot parse value '{value}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
