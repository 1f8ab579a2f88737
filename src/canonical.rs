// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonical signature rendering.
//!
//! [`canonical`] produces the bare `name(type,type,…)` string that
//! `method_id`/`topic0` hash — no argument names, no `indexed` markers, no
//! output arrow. [`display`] produces the fuller, human-facing rendering
//! used by `Debug`/`Display`-style output.

use crate::param_type::Writer;
use crate::FunctionSelector;

/// The hashed form: names and `indexed` annotations stripped.
pub fn canonical(selector: &FunctionSelector) -> String {
	let name = selector.function.as_deref().unwrap_or("");
	let args = selector.inputs.iter().map(|p| Writer::write(&p.kind)).collect::<Vec<_>>().join(",");
	format!("{}({})", name, args)
}

/// The human-facing form: argument names, `indexed` markers, and an output
/// arrow are included where present.
pub fn display(selector: &FunctionSelector) -> String {
	let name = selector.function.as_deref().unwrap_or("");
	let args = selector.inputs.iter().map(display_field).collect::<Vec<_>>().join(", ");
	let mut out = format!("{}({})", name, args);

	if let Some(outputs) = &selector.outputs {
		let outs = outputs.iter().map(display_field).collect::<Vec<_>>().join(", ");
		out.push_str(" -> (");
		out.push_str(&outs);
		out.push(')');
	}

	out
}

fn display_field(param: &crate::Param) -> String {
	let mut s = Writer::write(&param.kind);
	if param.indexed == Some(true) {
		s.push_str(" indexed");
	}
	if let Some(name) = &param.name {
		s.push(' ');
		s.push_str(name);
	}
	s
}
