use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chainsmith_compiler::DslDefinition;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: chainsmith_compiler::Error,
    },
}

/// Reads and deserializes one definition; `-` reads stdin.
pub fn load_definition(path: &Path) -> Result<DslDefinition, LoadError> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| LoadError::Read {
                path: path.to_owned(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_owned(),
            source,
        })?
    };
    parse_definition(path, &text)
}

pub fn parse_definition(path: &Path, text: &str) -> Result<DslDefinition, LoadError> {
    DslDefinition::from_json(text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Name used for `path` in diagnostics.
pub fn origin(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_owned()
    } else {
        path.display().to_string()
    }
}
