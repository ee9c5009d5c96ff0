use crate::value::Value;
use indexmap::IndexMap;
use std::fmt::Write;

/// JSON formatting style.
#[derive(Clone, Copy)]
pub enum JsonStyle {
    /// Compact: no whitespace between tokens.
    Compact,
    /// Pretty: 2-space indented, one entry per line.
    Pretty,
}

struct JsonWriter {
    buf: String,
    style: JsonStyle,
    depth: usize,
}

impl JsonWriter {
    fn new(style: JsonStyle) -> Self {
        JsonWriter {
            buf: String::new(),
            style,
            depth: 0,
        }
    }

    fn is_pretty(&self) -> bool {
        matches!(self.style, JsonStyle::Pretty)
    }

    fn newline(&mut self) {
        if self.is_pretty() {
            self.buf.push('\n');
            for _ in 0..self.depth {
                self.buf.push_str("  ");
            }
        }
    }

    fn space(&mut self) {
        if self.is_pretty() {
            self.buf.push(' ');
        }
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Number(n) => self.write_number(*n),
            Value::Array(items) => self.write_array(items),
            Value::Struct(fields) => self.write_object(fields),
        }
    }

    fn write_number(&mut self, n: f64) {
        // Float form (`1.0`, not `1`); exponent form (`1e20`, `1e-8`) for
        // large and small magnitudes. JSON has no NaN or infinity.
        if n.is_finite() {
            write!(&mut self.buf, "{:?}", n).unwrap();
        } else {
            self.buf.push_str("null");
        }
    }

    fn write_array(&mut self, items: &[Value]) {
        self.buf.push('[');
        self.depth += 1;

        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.newline();
            self.write_value(item);
        }

        self.depth -= 1;
        if !items.is_empty() {
            self.newline();
        }
        self.buf.push(']');
    }

    fn write_object(&mut self, fields: &IndexMap<String, Value>) {
        self.buf.push('{');
        self.depth += 1;

        let mut first = true;
        for (key, value) in fields {
            self.entry_sep(&mut first);
            self.write_key(key);
            self.write_value(value);
        }

        self.depth -= 1;
        if !fields.is_empty() {
            self.newline();
        }
        self.buf.push('}');
    }

    fn entry_sep(&mut self, first: &mut bool) {
        if *first {
            *first = false;
        } else {
            self.buf.push(',');
        }
        self.newline();
    }

    fn write_key(&mut self, key: &str) {
        self.write_string_value(key);
        self.buf.push(':');
        self.space();
    }

    fn write_string_value(&mut self, s: &str) {
        self.buf.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.buf.push_str("\\\""),
                '\\' => self.buf.push_str("\\\\"),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                '\u{0008}' => self.buf.push_str("\\b"),
                '\u{000C}' => self.buf.push_str("\\f"),
                c if c < '\u{0020}' => {
                    write!(&mut self.buf, "\\u{:04x}", c as u32).unwrap();
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }
}

/// Serialize a value to a compact JSON string (no whitespace).
pub fn to_json(value: &Value) -> String {
    let mut w = JsonWriter::new(JsonStyle::Compact);
    w.write_value(value);
    w.buf
}

/// Serialize a value to a pretty-printed JSON string (2-space indent).
pub fn to_json_pretty(value: &Value) -> String {
    let mut w = JsonWriter::new(JsonStyle::Pretty);
    w.write_value(value);
    w.buf
}

