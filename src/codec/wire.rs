//! Small helpers for picking typed values out of a `serde_json::Value`
//! tree while keeping track of the field path for error reporting.

use serde_json::Value;

use super::CodecError;

/// View `value` as an array, or fail naming `path`
pub(crate) fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], CodecError> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        CodecError::UnexpectedKind {
            path: path.to_string(),
            expected: "array",
        }
    })
}

/// View `value` as an object map, or fail naming `path`
pub(crate) fn as_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a serde_json::Map<String, Value>, CodecError> {
    value.as_object().ok_or_else(|| CodecError::UnexpectedKind {
        path: path.to_string(),
        expected: "object",
    })
}

/// View `value` as a string, or fail naming `path`
pub(crate) fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, CodecError> {
    value.as_str().ok_or_else(|| CodecError::UnexpectedKind {
        path: path.to_string(),
        expected: "string",
    })
}

/// View `value` as a non-negative integer index, or fail naming `path`
pub(crate) fn as_index(value: &Value, path: &str) -> Result<usize, CodecError> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| CodecError::UnexpectedKind {
            path: path.to_string(),
            expected: "non-negative integer",
        })
}

/// Fetch required field `key` from an envelope object at `path`
pub(crate) fn field<'a>(
    object: &'a serde_json::Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Value, CodecError> {
    object.get(key).ok_or_else(|| CodecError::MissingField {
        path: join(path, key),
    })
}

/// `"table" + "n"` → `"table.n"`; empty base stays bare
pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_paths_name_the_field() {
        let empty = json!({});
        let obj = as_object(&empty, "table").unwrap();
        let err = field(obj, "table", "n").unwrap_err();
        assert_eq!(err.to_string(), "missing required field at table.n");

        let err = as_index(&json!("nope"), "table.n").unwrap_err();
        assert!(err.to_string().contains("table.n"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "stringTable"), "stringTable");
        assert_eq!(join("table", "h"), "table.h");
    }
}
