use std::fmt::{self, Debug, Display, Formatter};

/// Core value enumeration used by the Minth interpreter.  This enumeration is used to represent
/// all data types that the interpreter and the underlying Minth code can understand and
/// manipulate.
///
/// Values are immutable once pushed onto the data stack.  Equality is strict per variant, there is
/// no numeric or textual coercion between the variants.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// We have an integer value.  Represented as an i64.
    Int(i64),

    /// A boolean value.  Within a script the `=` word is the only producer of booleans.
    Bool(bool),

    /// A string value, represented by a Rust string.  Strings only enter a program as
    /// unrecognized source tokens passed through verbatim.
    String(String),
}

/// Convert an arbitrary data type to a Value.
pub trait ToValue {
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}

/// Convert a borrowed string into a Value.
impl ToValue for &String {
    fn to_value(&self) -> Value {
        let string = (*self).clone();
        Value::String(string)
    }
}

/// Pretty print the value for display.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
        }
    }
}

/// Pretty print the value for debugging.  Strings are quoted and escaped so that they can be told
/// apart from the other variants in test output.
impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", Value::stringify(value)),
        }
    }
}

/// Define implementations for converting between Values and the raw data types they represent.
macro_rules! value_conversion {
    ($data_type:ty , $variant:ident) => {
        #[doc = concat!("Allow conversion from ", stringify!($data_type), " to a Value.")]
        impl ToValue for $data_type {
            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        #[doc = concat!("Support converting from a ", stringify!($data_type), " to a Value.")]
        impl From<$data_type> for Value {
            fn from(original: $data_type) -> Value {
                original.to_value()
            }
        }

        #[doc = concat!("Also support converting from a Value to a ", stringify!($data_type), ".")]
        impl From<Value> for $data_type {
            fn from(original: Value) -> $data_type {
                if let Value::$variant(contained_value) = original {
                    return contained_value;
                }

                panic!(
                    "Could not automatically convert from a Value to a {}.",
                    stringify!($data_type)
                );
            }
        }
    };
}

// Implement the simple conversions for the value enumeration types.
value_conversion!(i64, Int);
value_conversion!(bool, Bool);
value_conversion!(String, String);

/// Handily implement variant checks for the types the Value enumeration supports.
macro_rules! is_variant {
    ($name:ident , $variant:ident) => {
        #[doc = concat!("Check if the value is the variant ", stringify!($variant), ".")]
        pub fn $name(&self) -> bool {
            matches!(self, Value::$variant(_))
        }
    };
}

impl Value {
    // Create variant checks for the supported types.
    is_variant!(is_int, Int);
    is_variant!(is_bool, Bool);
    is_variant!(is_string, String);

    /// Get the integer the value holds.  Only applicable to values that satisfy the is_int()
    /// test.
    pub fn get_int_val(&self) -> i64 {
        match self {
            Value::Int(value) => *value,
            _ => panic!("Value is not convertible to int."),
        }
    }

    /// Get the boolean the value holds.  Only applicable to values that satisfy the is_bool()
    /// test.
    pub fn get_bool_val(&self) -> bool {
        match self {
            Value::Bool(value) => *value,
            _ => panic!("Value is not convertible to bool."),
        }
    }
}

impl Value {
    /// Convert a string to a string that could be used directly within source code.  For example,
    /// new lines are converted to the \n escape sequence, etc.  The string is also enclosed in
    /// double quotes.
    ///
    /// Mainly used for debug and stack printing.
    pub fn stringify(text: &str) -> String {
        let mut result = String::new();

        result.push('"');

        for character in text.chars() {
            match character {
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                _ => result.push(character),
            }
        }

        result.push('"');

        result
    }
}
