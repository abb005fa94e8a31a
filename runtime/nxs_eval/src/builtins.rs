//! Builtin function table.
//!
//! Builtins resolve before user functions. `println`/`print`/`log` forward
//! variadic arguments to the print handler; `alert` raises a single host
//! notification; `load`/`import`/`require` delegate to the injected import
//! host and report success as a boolean; `type_of` and `length` are small
//! introspection helpers.

use crate::interpreter::Interpreter;
use crate::value::Value;
use tracing::warn;

/// Invoke a builtin by name. Returns `None` if `name` is not a builtin,
/// letting the caller fall through to user-defined functions.
pub(crate) fn dispatch(interp: &mut Interpreter, name: &str, args: &[Value]) -> Option<Value> {
    match name {
        "println" | "log" => {
            interp.print.println(&join_args(args));
            Some(Value::Null)
        }
        "print" => {
            interp.print.print(&join_args(args));
            Some(Value::Null)
        }
        "alert" => {
            let msg = args.first().map(Value::display_text).unwrap_or_default();
            interp.print.alert(&msg);
            Some(Value::Null)
        }
        "load" | "import" | "require" => Some(Value::Bool(run_import(interp, args))),
        "type_of" => {
            let v = args.first().cloned().unwrap_or(Value::Null);
            Some(Value::Str(v.type_name().to_string()))
        }
        "length" => Some(match args.first() {
            Some(Value::Str(s)) => Value::Num(s.chars().count() as f64),
            _ => Value::Null,
        }),
        _ => None,
    }
}

fn join_args(args: &[Value]) -> String {
    args.iter()
        .map(Value::display_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drive a nested load through the import host. Failures are reported as
/// `false`, never propagated: a broken import must not abort the caller.
fn run_import(interp: &Interpreter, args: &[Value]) -> bool {
    let Some(Value::Str(path)) = args.first() else {
        warn!("import builtin called without a path argument");
        return false;
    };
    let Some(host) = interp.import_host.as_ref() else {
        warn!(%path, "import requested but no import host is installed");
        return false;
    };
    host.clone().load(path)
}
