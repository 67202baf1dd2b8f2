use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
    pub verbose: bool,
}

impl OutputOptions {
    /// Serialize `value` as JSON, honouring `--pretty`.
    pub fn to_json<T: serde::Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

/// Decide whether to emit ANSI colors.
///
/// `setting` is the config `color` value: "always", "never" or "auto".
pub fn detect_color(color_flag: bool, setting: &str) -> bool {
    if !color_flag {
        return false;
    }
    match setting {
        "always" => true,
        "never" => false,
        _ => std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(pretty: bool) -> OutputOptions {
        OutputOptions {
            format: OutputFormat::Json,
            pretty,
            use_color: false,
            verbose: false,
        }
    }

    #[test]
    fn no_color_flag_wins() {
        assert!(!detect_color(false, "always"));
    }

    #[test]
    fn explicit_settings() {
        assert!(detect_color(true, "always"));
        assert!(!detect_color(true, "never"));
    }

    #[test]
    fn to_json_compact_and_pretty() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(opts(false).to_json(&value).unwrap(), r#"{"a":1}"#);
        assert!(opts(true).to_json(&value).unwrap().contains('\n'));
    }
}
