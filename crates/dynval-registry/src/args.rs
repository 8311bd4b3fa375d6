//! Conversions between textual rule arguments and dynamic values.

use dynval_kernel::{Value, to_text};

/// Wrap each rule argument string as a string value.
pub fn strings_to_args<S: AsRef<str>>(strings: &[S]) -> Vec<Value> {
    strings
        .iter()
        .map(|s| Value::Str(s.as_ref().to_string()))
        .collect()
}

/// Render each argument as text. Unset values and the nil sentinel render
/// empty; composites fall back to their display form.
pub fn args_to_strings(args: &[Value]) -> Vec<String> {
    args.iter()
        .map(|arg| match arg {
            Value::Nil => String::new(),
            other => to_text(other).unwrap_or_else(|_| other.to_string()),
        })
        .collect()
}
