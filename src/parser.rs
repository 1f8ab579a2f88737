// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Grammar parser: turns [`lexer::Token`](crate::lexer::Token)s from a
//! human-readable signature string into a [`FunctionSelector`].
//!
//! Argument lists can nest arbitrarily (tuples inside tuples), so the
//! in-progress lists are kept on an explicit stack rather than built up
//! through recursive calls — the parser's own call depth stays constant
//! regardless of how deeply the input nests.

use crate::lexer::{lex, Token, TokenKind};
use crate::{FunctionSelector, Param, ParamType, ParseError, Reader, SelectorKind};

/// Parses a full signature, e.g. `transfer(address to, uint256 amount)`,
/// `Transfer(address indexed from, address indexed to, uint256 value)`, or
/// a bare `(uint256,bool)`.
pub fn parse(input: &str) -> Result<FunctionSelector, ParseError> {
	let tokens = lex(input)?;
	let mut pos = 0usize;

	let name = match tokens.get(pos) {
		Some(Token { kind: TokenKind::Ident(_), .. }) => {
			let (text, new_pos) = parse_name_token_run(&tokens, input, pos);
			pos = new_pos;
			Some(text.to_owned())
		}
		_ => None,
	};

	expect(&tokens, pos, &TokenKind::LParen)?;
	pos += 1;

	let (mut inputs, new_pos) = parse_arg_list(&tokens, input, pos)?;
	pos = new_pos;

	let is_event = inputs.iter().any(|p| p.indexed == Some(true));
	if is_event {
		for p in inputs.iter_mut() {
			if p.indexed.is_none() {
				p.indexed = Some(false);
			}
		}
	} else {
		for p in inputs.iter_mut() {
			p.indexed = None;
		}
	}

	let mut outputs = None;
	if !is_event {
		if let Some(Token { kind: TokenKind::Arrow, .. }) = tokens.get(pos) {
			pos += 1;
			expect(&tokens, pos, &TokenKind::LParen)?;
			pos += 1;
			let (outs, new_pos) = parse_arg_list(&tokens, input, pos)?;
			pos = new_pos;
			outputs = Some(outs);
		}
	}

	if pos != tokens.len() {
		return Err(ParseError::at(
			tokens.get(pos).map(|t| t.pos).unwrap_or(input.len()),
			"unexpected trailing input".to_owned(),
		));
	}

	let kind = if name.is_none() {
		SelectorKind::Unnamed
	} else if is_event {
		SelectorKind::Event
	} else {
		SelectorKind::Function
	};

	Ok(FunctionSelector { function: name, kind, mutability: None, inputs, outputs })
}

/// Parses a comma-separated argument list up to (and consuming) its closing
/// `)`. `pos` must point just past the opening `(` of the outermost list.
fn parse_arg_list(tokens: &[Token], input: &str, pos: usize) -> Result<(Vec<Param>, usize), ParseError> {
	let mut stack: Vec<Vec<Param>> = vec![Vec::new()];
	let mut i = pos;

	loop {
		let depth = stack.len() - 1;
		match tokens.get(i).map(|t| &t.kind) {
			Some(TokenKind::RParen) => {
				i += 1;
				if stack.len() == 1 {
					return Ok((stack.pop().expect("stack never empty"), i));
				}
				let fields = stack.pop().expect("stack never empty");
				let tuple = ParamType::Tuple(fields);
				let (kind, new_i) = parse_array_suffixes(tokens, input, i, tuple)?;
				i = new_i;
				let (indexed, fname, new_i) = parse_trailing(tokens, input, i, depth - 1 == 0)?;
				i = new_i;
				stack
					.last_mut()
					.expect("stack never empty")
					.push(Param { name: fname, kind, indexed, internal_type: None });
				i = skip_comma(tokens, i);
			}
			Some(TokenKind::LParen) => {
				stack.push(Vec::new());
				i += 1;
			}
			Some(_) => {
				let (base, new_i) = parse_type_token_run(tokens, input, i)?;
				let param_type = Reader::read(base)?;
				let (indexed, fname, new_i) = parse_trailing(tokens, input, new_i, depth == 0)?;
				i = new_i;
				stack
					.last_mut()
					.expect("stack never empty")
					.push(Param { name: fname, kind: param_type, indexed, internal_type: None });
				i = skip_comma(tokens, i);
			}
			None => return Err(ParseError::eof("unterminated argument list")),
		}
	}
}

fn skip_comma(tokens: &[Token], i: usize) -> usize {
	if matches!(tokens.get(i).map(|t| &t.kind), Some(TokenKind::Comma)) {
		i + 1
	} else {
		i
	}
}

/// Consumes `[<digits>?]` suffixes applied to an already-built base type.
fn parse_array_suffixes(
	tokens: &[Token],
	_input: &str,
	mut i: usize,
	mut kind: ParamType,
) -> Result<(ParamType, usize), ParseError> {
	loop {
		match tokens.get(i).map(|t| &t.kind) {
			Some(TokenKind::LBracket) => {
				i += 1;
				match tokens.get(i).map(|t| &t.kind) {
					Some(TokenKind::Int(n)) => {
						let n = *n;
						i += 1;
						expect(tokens, i, &TokenKind::RBracket)?;
						i += 1;
						kind = ParamType::FixedArray(Box::new(kind), n as usize);
					}
					Some(TokenKind::RBracket) => {
						i += 1;
						kind = ParamType::Array(Box::new(kind));
					}
					_ => return Err(ParseError::at(tokens.get(i).map(|t| t.pos).unwrap_or(0), "expected `]`".to_owned())),
				}
			}
			_ => return Ok((kind, i)),
		}
	}
}

/// Reconstructs the contiguous source slice for one leaf type token, e.g.
/// `uint256[3][]`, by following adjacent token spans back into `input`.
fn parse_type_token_run<'a>(tokens: &[Token], input: &'a str, i: usize) -> Result<(&'a str, usize), ParseError> {
	let first = tokens.get(i).ok_or_else(|| ParseError::eof("expected a type"))?;
	let start = first.pos;
	let mut end = start + token_len(&first.kind);
	let mut j = i + 1;

	while let Some(tok) = tokens.get(j) {
		if tok.pos != end {
			break;
		}
		match &tok.kind {
			TokenKind::Ident(_) | TokenKind::Int(_) | TokenKind::LBracket | TokenKind::RBracket => {
				end += token_len(&tok.kind);
				j += 1;
			}
			_ => break,
		}
	}

	Ok((&input[start..end], j))
}

/// Reconstructs the contiguous source slice for a name token, stitching a
/// digit suffix (`amount0`, `reserve1`) back onto its leading identifier the
/// same way [`parse_type_token_run`] does for types. Unlike that function,
/// brackets never extend a name.
fn parse_name_token_run<'a>(tokens: &[Token], input: &'a str, i: usize) -> (&'a str, usize) {
	let first = &tokens[i];
	let start = first.pos;
	let mut end = start + token_len(&first.kind);
	let mut j = i + 1;

	while let Some(tok) = tokens.get(j) {
		if tok.pos != end {
			break;
		}
		match &tok.kind {
			TokenKind::Ident(_) | TokenKind::Int(_) => {
				end += token_len(&tok.kind);
				j += 1;
			}
			_ => break,
		}
	}

	(&input[start..end], j)
}

fn token_len(kind: &TokenKind) -> usize {
	match kind {
		TokenKind::Ident(s) => s.len(),
		TokenKind::Int(n) => n.to_string().len(),
		TokenKind::LParen | TokenKind::RParen | TokenKind::LBracket | TokenKind::RBracket | TokenKind::Comma => 1,
		TokenKind::Arrow => 2,
	}
}

/// Parses the optional `indexed` keyword (only meaningful at the outermost
/// nesting level) followed by an optional field name.
fn parse_trailing(
	tokens: &[Token],
	input: &str,
	mut i: usize,
	allow_indexed: bool,
) -> Result<(Option<bool>, Option<String>, usize), ParseError> {
	let mut indexed = None;
	if allow_indexed {
		if let Some(Token { kind: TokenKind::Ident(s), .. }) = tokens.get(i) {
			if s == "indexed" {
				indexed = Some(true);
				i += 1;
			}
		}
	}

	let name = if let Some(Token { kind: TokenKind::Ident(_), .. }) = tokens.get(i) {
		let (text, new_i) = parse_name_token_run(tokens, input, i);
		i = new_i;
		Some(text.to_owned())
	} else {
		None
	};

	Ok((indexed, name, i))
}

fn expect(tokens: &[Token], i: usize, expected: &TokenKind) -> Result<(), ParseError> {
	match tokens.get(i) {
		Some(t) if &t.kind == expected => Ok(()),
		Some(t) => Err(ParseError::at(t.pos, format!("expected {:?}, found {:?}", expected, t.kind))),
		None => Err(ParseError::eof(format!("expected {:?}", expected))),
	}
}
