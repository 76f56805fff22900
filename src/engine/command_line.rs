//! Engine command lines.

use crate::ConfigError;
use derive_getters::Getters;
use tracing::instrument;

/// Program and arguments used to launch an engine.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct EngineCommand {
    /// Executable name or path.
    program: String,
    /// Arguments passed to the executable.
    args: Vec<String>,
}

impl EngineCommand {
    /// Creates a command from an explicit program and argument list.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on spaces, with no quoting support.
    ///
    /// This is not strict single-space splitting: empty pieces are dropped,
    /// so `"gnugo  --mode gtp"` yields `["--mode", "gtp"]` as arguments
    /// rather than an empty argument between the two spaces. An argument can
    /// therefore never be the empty string.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let mut parts = line.split(' ').filter(|part| !part.is_empty());
        let program = parts
            .next()
            .ok_or_else(|| ConfigError::new(format!("Empty engine command: {:?}", line)))?;
        Ok(Self::new(program, parts.map(str::to_string).collect()))
    }
}

impl std::fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
