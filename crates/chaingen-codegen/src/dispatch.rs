//! Action dispatch emission.
//!
//! Produces the contract entry point: a `match` on the numeric action id
//! routing direct actions (receiver == first receiver) and incoming
//! notifications (receiver != first receiver) to their handlers. Each
//! non-ignored action unpacks its parameter struct from the payload;
//! ignored actions skip the unpack and receive `None` placeholders.

use std::fmt::Write;

use chaingen_schema::{name, ActionDef, Schema};

use crate::error::EmitResult;

/// Emitted parameter-struct type name for an action: the action name with
/// each dot-separated label capitalized, plus an `Args` suffix.
pub fn args_type_name(action_name: &str) -> String {
    let mut out = String::with_capacity(action_name.len() + 4);
    for label in action_name.split('.') {
        let mut chars = label.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out.push_str("Args");
    out
}

/// Emit the `apply` entry point dispatching every registered action.
pub fn emit_dispatch(schema: &Schema) -> EmitResult<String> {
    let mut out = String::new();
    writeln!(
        out,
        "pub fn apply(receiver: u64, first_receiver: u64, action: u64) {{"
    )?;
    writeln!(
        out,
        "    let mut contract = Contract::new(receiver, first_receiver, action);"
    )?;
    writeln!(out, "    let data = read_action_data();")?;
    writeln!(out, "    if receiver == first_receiver {{")?;
    emit_match(&mut out, schema, false)?;
    writeln!(out, "    }}")?;
    writeln!(out, "    if receiver != first_receiver {{")?;
    emit_match(&mut out, schema, true)?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(out)
}

fn emit_match(out: &mut String, schema: &Schema, notify: bool) -> EmitResult<()> {
    writeln!(out, "        match action {{")?;
    for action in schema.actions() {
        if action.notify != notify {
            continue;
        }
        writeln!(
            out,
            "            {}u64 => {{ // {}",
            name::encode(&action.name),
            action.name
        )?;
        emit_handler_call(out, action)?;
        writeln!(out, "            }}")?;
    }
    writeln!(out, "            _ => {{}}")?;
    writeln!(out, "        }}")?;
    Ok(())
}

fn emit_handler_call(out: &mut String, action: &ActionDef) -> EmitResult<()> {
    let args: Vec<String> = if action.ignore_params {
        // Shape was validated at registration; every parameter can take a
        // placeholder.
        action.params.iter().map(|_| "None".to_string()).collect()
    } else {
        writeln!(
            out,
            "                let t = {}::unpack(&data);",
            args_type_name(&action.name)
        )?;
        action
            .params
            .iter()
            .map(|param| {
                if param.is_pointer() {
                    format!("Some(t.{})", param.name)
                } else {
                    format!("t.{}", param.name)
                }
            })
            .collect()
    };
    writeln!(
        out,
        "                contract.{}({});",
        action.handler,
        args.join(", ")
    )?;
    Ok(())
}
