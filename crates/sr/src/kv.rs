use std::io::Read;

use serde_json::{Map, Value};

use crate::error::CommandError;

/// Parse `key=value` command arguments into a JSON object.
///
/// A value of `-` reads the value from the given reader (at most once per
/// command), a value starting with `@` loads the named file, and a leading
/// `\@` escapes a literal `@`. Values are passed through without trimming or
/// transformation. Later duplicates of a key win.
pub(crate) fn parse_args_data(
    stdin: &mut dyn Read,
    args: &[String],
) -> Result<Map<String, Value>, CommandError> {
    let mut data = Map::new();
    let mut stdin_used = false;

    for arg in args {
        let (key, raw) = arg
            .split_once('=')
            .ok_or_else(|| CommandError::Usage(format!("invalid key=value pair {arg:?}")))?;

        let value = if raw == "-" {
            if stdin_used {
                return Err(CommandError::Usage(
                    "stdin can only be used as a value once per command".into(),
                ));
            }
            stdin_used = true;
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer).map_err(|e| {
                CommandError::Usage(format!("failed to read value from stdin: {e}"))
            })?;
            buffer
        } else if let Some(literal) = raw.strip_prefix("\\@") {
            format!("@{literal}")
        } else if let Some(file) = raw.strip_prefix('@') {
            std::fs::read_to_string(file)
                .map_err(|e| CommandError::Usage(format!("failed to read file {file:?}: {e}")))?
        } else {
            raw.to_string()
        };

        data.insert(key.to_string(), Value::String(value));
    }

    Ok(data)
}

/// Remove surrounding whitespace and slashes from a request path.
pub(crate) fn sanitize_path(path: &str) -> String {
    path.trim().trim_matches('/').to_string()
}
