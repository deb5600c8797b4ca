use thiserror::Error;

/// Domain-specific errors for the scheduler
#[derive(Error, Debug)]
pub enum SchedulerError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    // Infeasible instance (§7.2): must be rejected before the search starts
    #[error("Specialization {specialization} needs {needed} slots but only {available} exist")]
    TooManyStudyClasses {
        specialization: String,
        needed: usize,
        available: usize,
    },

    #[error("No classrooms are available for specialization {specialization}")]
    NoMatchingClassrooms { specialization: String },

    // Persistence (§6, §7.4)
    #[error("Failed to persist population to '{path}': {message}")]
    Persistence { path: String, message: String },
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
