// 📐 Shape Layer - Field Validation
// Reads untyped JSON input into typed insertable / partial shapes,
// collecting EVERY violated field instead of stopping at the first one.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// A single field that failed its constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field-level violation found in one input object.
///
/// Never constructed empty by [`FieldReader::finish`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationErrors {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any error names `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "validation failed: {}", joined.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// CLOSED STRING ENUMERATIONS
// ============================================================================

/// A closed set of string values (`propertyType`, `listingStatus`)
pub trait Choice: Sized + Copy {
    /// Wire spelling of every variant, in declaration order
    const VARIANTS: &'static [&'static str];

    fn from_wire(value: &str) -> Option<Self>;

    fn as_wire(&self) -> &'static str;

    /// Message used when a value falls outside the set
    fn invalid_message(received: &str) -> String {
        let expected: Vec<String> = Self::VARIANTS.iter().map(|v| format!("'{}'", v)).collect();
        format!(
            "Invalid enum value. Expected {}, received '{}'",
            expected.join(" | "),
            received
        )
    }
}

// ============================================================================
// FIELD READER
// ============================================================================

enum Slot<'a> {
    Missing,
    Null,
    Present(&'a Value),
}

/// Reads fields out of a JSON object, accumulating errors as it goes.
///
/// `required_*` readers record "Required" for a missing field and hand back a
/// placeholder so that parsing can continue; the placeholder never escapes
/// because [`FieldReader::finish`] fails whenever an error was recorded.
/// Plain readers treat a missing field as "not supplied" (`None`), which is
/// what partial updates need. Unknown fields are ignored.
pub struct FieldReader<'a> {
    fields: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a Value) -> Self {
        let mut errors = Vec::new();
        let fields = input.as_object();
        if fields.is_none() {
            errors.push(FieldError::new(
                "body",
                format!("Expected object, received {}", kind_of(input)),
            ));
        }
        FieldReader { fields, errors }
    }

    fn slot(&self, field: &str) -> Slot<'a> {
        match self.fields.and_then(|m| m.get(field)) {
            None => Slot::Missing,
            Some(Value::Null) => Slot::Null,
            Some(value) => Slot::Present(value),
        }
    }

    /// Record an error against `field`
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn check(&mut self, field: &str, ok: bool, message: &str) {
        if !ok {
            self.push(field, message);
        }
    }

    fn mismatch(&mut self, field: &str, expected: &str, value: &Value) {
        let message = format!("Expected {}, received {}", expected, kind_of(value));
        self.push(field, message);
    }

    fn missing(&mut self, field: &str) {
        self.push(field, "Required");
    }

    // ------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------

    fn read_text(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                self.push(field, "String must contain at least 1 character(s)");
                None
            }
            Some(s) => Some(s.to_string()),
            None => {
                self.mismatch(field, "string", value);
                None
            }
        }
    }

    /// Non-empty string that must be supplied
    pub fn required_text(&mut self, field: &str) -> String {
        self.text_inner(field, true).unwrap_or_default()
    }

    /// Non-empty string, `None` when absent
    pub fn text(&mut self, field: &str) -> Option<String> {
        self.text_inner(field, false)
    }

    fn text_inner(&mut self, field: &str, required: bool) -> Option<String> {
        match self.slot(field) {
            Slot::Missing => {
                if required {
                    self.missing(field);
                }
                None
            }
            Slot::Null => {
                self.push(field, "Expected string, received null");
                None
            }
            Slot::Present(value) => self.read_text(field, value),
        }
    }

    fn read_display_text(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.mismatch(field, "string", value);
                None
            }
        }
    }

    /// Display string that may be empty, `None` when absent. The field is
    /// not nullable, so an explicit null is an error.
    pub fn display_text(&mut self, field: &str) -> Option<String> {
        match self.slot(field) {
            Slot::Missing => None,
            Slot::Null => {
                self.push(field, "Expected string, received null");
                None
            }
            Slot::Present(value) => self.read_display_text(field, value),
        }
    }

    /// Display string that may be empty; absent or null yields `default`
    pub fn display_text_or(&mut self, field: &str, default: &str) -> String {
        match self.slot(field) {
            Slot::Missing | Slot::Null => default.to_string(),
            Slot::Present(value) => self
                .read_display_text(field, value)
                .unwrap_or_else(|| default.to_string()),
        }
    }

    /// Nullable string: outer `None` = absent, `Some(None)` = explicit null
    pub fn nullable_text(&mut self, field: &str) -> Option<Option<String>> {
        match self.slot(field) {
            Slot::Missing => None,
            Slot::Null => Some(None),
            Slot::Present(value) => match value.as_str() {
                Some(s) => Some(Some(s.to_string())),
                None => {
                    self.mismatch(field, "string", value);
                    None
                }
            },
        }
    }

    // ------------------------------------------------------------------------
    // Integers
    // ------------------------------------------------------------------------

    fn read_integer(&mut self, field: &str, value: &Value, min: i64) -> Option<i64> {
        if !value.is_number() {
            self.mismatch(field, "number", value);
            return None;
        }
        match value.as_i64() {
            Some(n) if n < min => {
                self.push(
                    field,
                    format!("Number must be greater than or equal to {}", min),
                );
                None
            }
            Some(n) => Some(n),
            None => {
                self.push(field, "Expected integer, received float");
                None
            }
        }
    }

    /// Integer `>= min` that must be supplied
    pub fn required_integer(&mut self, field: &str, min: i64) -> i64 {
        match self.slot(field) {
            Slot::Missing => {
                self.missing(field);
                0
            }
            Slot::Null => {
                self.push(field, "Expected number, received null");
                0
            }
            Slot::Present(value) => self.read_integer(field, value, min).unwrap_or_default(),
        }
    }

    /// Integer `>= min`, `None` when absent
    pub fn integer(&mut self, field: &str, min: i64) -> Option<i64> {
        match self.slot(field) {
            Slot::Missing => None,
            Slot::Null => {
                self.push(field, "Expected number, received null");
                None
            }
            Slot::Present(value) => self.read_integer(field, value, min),
        }
    }

    pub fn nullable_integer(&mut self, field: &str, min: i64) -> Option<Option<i64>> {
        match self.slot(field) {
            Slot::Missing => None,
            Slot::Null => Some(None),
            Slot::Present(value) => self.read_integer(field, value, min).map(Some),
        }
    }

    // ------------------------------------------------------------------------
    // Booleans, lists, enumerations
    // ------------------------------------------------------------------------

    /// Boolean flag; absent or null yields `None`
    pub fn flag(&mut self, field: &str) -> Option<bool> {
        match self.slot(field) {
            Slot::Missing | Slot::Null => None,
            Slot::Present(value) => match value.as_bool() {
                Some(b) => Some(b),
                None => {
                    self.mismatch(field, "boolean", value);
                    None
                }
            },
        }
    }

    /// Nullable ordered list of strings
    pub fn nullable_list(&mut self, field: &str) -> Option<Option<Vec<String>>> {
        let value = match self.slot(field) {
            Slot::Missing => return None,
            Slot::Null => return Some(None),
            Slot::Present(value) => value,
        };
        let Some(items) = value.as_array() else {
            self.mismatch(field, "array", value);
            return None;
        };

        let mut list = Vec::with_capacity(items.len());
        let mut ok = true;
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => list.push(s.to_string()),
                None => {
                    self.mismatch(&format!("{}.{}", field, index), "string", item);
                    ok = false;
                }
            }
        }
        ok.then_some(Some(list))
    }

    fn read_choice<T: Choice>(&mut self, field: &str, value: &Value) -> Option<T> {
        let Some(s) = value.as_str() else {
            // Non-string values are outside the set too
            let received = value.to_string();
            self.push(field, T::invalid_message(&received));
            return None;
        };
        match T::from_wire(s) {
            Some(choice) => Some(choice),
            None => {
                self.push(field, T::invalid_message(s));
                None
            }
        }
    }

    /// Enumeration member that must be supplied
    pub fn required_choice<T: Choice + Default>(&mut self, field: &str) -> T {
        match self.slot(field) {
            Slot::Missing => {
                self.missing(field);
                T::default()
            }
            Slot::Null => {
                self.push(field, T::invalid_message("null"));
                T::default()
            }
            Slot::Present(value) => self.read_choice(field, value).unwrap_or_default(),
        }
    }

    pub fn choice<T: Choice>(&mut self, field: &str) -> Option<T> {
        match self.slot(field) {
            Slot::Missing => None,
            Slot::Null => {
                self.push(field, T::invalid_message("null"));
                None
            }
            Slot::Present(value) => self.read_choice(field, value),
        }
    }

    // ------------------------------------------------------------------------
    // Result
    // ------------------------------------------------------------------------

    /// Hand back `value` if no field failed, otherwise every recorded error
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
