//! Host functions callable from Tern code.

use crate::Value;

/// Native function signature. `Err` carries the runtime error message.
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// Lookup of host functions by name (at compile time) and by index (at
/// run time).
pub trait BuiltinRegistry {
    fn index_of(&self, name: &str) -> Option<u32>;

    fn resolve(&self, index: u32) -> Option<NativeFn>;

    fn name_of(&self, index: u32) -> Option<&str>;

    fn is_builtin(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// Fail unless exactly `wanted` arguments were passed.
pub fn check_arity(args: &[Value], wanted: usize) -> Result<(), String> {
    if args.len() == wanted {
        Ok(())
    } else {
        Err(format!(
            "wrong number of arguments. got={}, wanted={wanted}",
            args.len()
        ))
    }
}

/// The default builtin set: `len`, `puts`, `first`, `last`, `rest`,
/// `push`, `type`, `error`.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardBuiltins;

static STANDARD: &[(&str, NativeFn)] = &[
    ("len", len),
    ("puts", puts),
    ("first", first),
    ("last", last),
    ("rest", rest),
    ("push", push),
    ("type", type_of),
    ("error", error),
];

impl BuiltinRegistry for StandardBuiltins {
    fn index_of(&self, name: &str) -> Option<u32> {
        let idx = STANDARD.iter().position(|(n, _)| *n == name)?;
        u32::try_from(idx).ok()
    }

    fn resolve(&self, index: u32) -> Option<NativeFn> {
        STANDARD.get(index as usize).map(|(_, f)| *f)
    }

    fn name_of(&self, index: u32) -> Option<&str> {
        STANDARD.get(index as usize).map(|(name, _)| *name)
    }
}

fn array_arg<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], String> {
    value
        .as_array()
        .ok_or_else(|| format!("argument to `{name}` must be array, got {}", value.type_name()))
}

fn len(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 1)?;
    let n = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Hash(map) => map.len(),
        other => {
            return Err(format!(
                "argument to `len` not supported, got {}",
                other.type_name()
            ))
        }
    };
    i64::try_from(n)
        .map(Value::Int)
        .map_err(|_| "length does not fit in an int".to_string())
}

fn puts(args: &[Value]) -> Result<Value, String> {
    for arg in args {
        println!("{arg}");
    }
    Ok(Value::Null)
}

fn first(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 1)?;
    let items = array_arg("first", &args[0])?;
    Ok(items.first().cloned().unwrap_or(Value::Null))
}

fn last(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 1)?;
    let items = array_arg("last", &args[0])?;
    Ok(items.last().cloned().unwrap_or(Value::Null))
}

fn rest(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 1)?;
    let items = array_arg("rest", &args[0])?;
    match items.split_first() {
        Some((_, tail)) => Ok(Value::array(tail.to_vec())),
        None => Ok(Value::Null),
    }
}

fn push(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 2)?;
    let items = array_arg("push", &args[0])?;
    let mut grown = Vec::with_capacity(items.len() + 1);
    grown.extend_from_slice(items);
    grown.push(args[1].clone());
    Ok(Value::array(grown))
}

fn type_of(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 1)?;
    Ok(Value::string(args[0].type_name()))
}

fn error(args: &[Value]) -> Result<Value, String> {
    check_arity(args, 1)?;
    Ok(Value::error(args[0].to_string(), None))
}

#[cfg(test)]
mod tests;
