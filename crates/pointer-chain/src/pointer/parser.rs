//! Pointer expression parser
//!
//! Grammar accepted:
//!
//! ```text
//! expression := '['+ base ']' term*
//! base       := hex | module ' ' '(' '=' hex ')'
//! term       := ('+' | '-') hex ']'?
//! hex        := ('0x' | '0X')? [0-9A-Fa-f]{1,16}
//! ```
//!
//! Whitespace between tokens is optional. Every term after the base contributes
//! one offset, and there must be at least one term per leading `[`.

use tracing::debug;

use super::{Base, MemoryPointer};
use crate::error::{Error, Result};

/// Parse a single pointer expression such as `[[0x81234560] + 0x10] - 0x4`
pub fn parse(text: &str) -> Result<MemoryPointer> {
    parse_expression(text)
        .map_err(|reason| Error::malformed(text, reason))
        .inspect_err(|e| debug!("Rejected pointer expression: {}", e))
}

/// Parse newline-separated pointer expressions, skipping blank lines
pub fn parse_list(text: &str) -> Result<Vec<MemoryPointer>> {
    let mut pointers = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let pointer = parse(line).map_err(|source| Error::MalformedListEntry {
            line: index + 1,
            source: Box::new(source),
        })?;
        pointers.push(pointer);
    }

    debug!("Parsed {} pointers from list", pointers.len());
    Ok(pointers)
}

fn parse_expression(text: &str) -> std::result::Result<MemoryPointer, String> {
    let trimmed = text.trim();
    let nested = trimmed.trim_start_matches('[');
    let depth = trimmed.len() - nested.len();
    if depth == 0 {
        return Err("expression must start with '['".to_string());
    }

    let (base_expression, mut rest) = nested
        .split_once(']')
        .ok_or_else(|| "missing ']' after base".to_string())?;
    let base = parse_base(base_expression)?;

    let mut offsets = Vec::with_capacity(depth);
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let (offset, remaining) = parse_offset_term(rest)?;
        offsets.push(offset);

        let remaining = remaining.trim_start();
        rest = remaining.strip_prefix(']').unwrap_or(remaining);
    }

    if offsets.len() < depth {
        return Err(format!(
            "expected {} offsets for {} '[' levels, found {}",
            depth,
            depth,
            offsets.len()
        ));
    }

    Ok(MemoryPointer::new(base, offsets))
}

fn parse_base(expression: &str) -> std::result::Result<Base, String> {
    if !expression.contains(' ') {
        let (address, rest) = hex_run(expression)?;
        if !rest.is_empty() {
            return Err(format!("unexpected '{}' after base address", rest));
        }
        return Ok(Base::Absolute(address));
    }

    // Module form: `Module.so+0x40 (=0x81234560)`
    let (name, resolved) = expression
        .split_once('(')
        .ok_or_else(|| "module base is missing '('".to_string())?;
    let name = name.trim_end();
    if name.is_empty() {
        return Err("module base has no module name".to_string());
    }

    let resolved = resolved
        .trim_start()
        .strip_prefix('=')
        .ok_or_else(|| "module base is missing '='".to_string())?;
    let (address, rest) = hex_run(resolved.trim_start())?;
    if rest.trim() != ")" {
        return Err("module base is missing ')'".to_string());
    }

    Ok(Base::ModuleRelative {
        name: name.to_string(),
        resolved: address,
    })
}

fn parse_offset_term(term: &str) -> std::result::Result<(i64, &str), String> {
    let (negative, rest) = if let Some(rest) = term.strip_prefix('+') {
        (false, rest)
    } else if let Some(rest) = term.strip_prefix('-') {
        (true, rest)
    } else {
        return Err(format!("expected '+' or '-' before offset at '{}'", term));
    };

    // Magnitude is read unsigned and reinterpreted, then negated
    let (magnitude, rest) = hex_run(rest.trim_start())?;
    let offset = magnitude as i64;
    let offset = if negative { offset.wrapping_neg() } else { offset };

    Ok((offset, rest))
}

/// Read a hex number at the start of `input`, returning it and the unread rest
fn hex_run(input: &str) -> std::result::Result<(u64, &str), String> {
    let digits_start = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let end = digits_start
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits_start.len());
    let (digits, rest) = digits_start.split_at(end);

    if digits.is_empty() {
        return Err(format!("expected hex digits at '{}'", input));
    }

    let value = u64::from_str_radix(digits, 16)
        .map_err(|e| format!("invalid hex number '{}': {}", digits, e))?;
    Ok((value, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_with_trailing_brackets() {
        let pointer = parse("[0x81234560] + 0x10] - 0x4]").unwrap();
        assert_eq!(pointer.base(), &Base::Absolute(0x8123_4560));
        assert_eq!(pointer.offsets(), &[0x10, -0x4]);
    }

    #[test]
    fn test_parse_nested_form() {
        let pointer = parse("[[[0x10A0B4C0] + 0x18] + 0x4] - 0x20").unwrap();
        assert_eq!(pointer.base_address(), 0x10A0_B4C0);
        assert_eq!(pointer.offsets(), &[0x18, 0x4, -0x20]);
    }

    #[test]
    fn test_parse_module_relative() {
        let pointer = parse("[[Module.so+0x40 (=0x81234560)] + 0x10] + 0x8").unwrap();
        assert_eq!(
            pointer.base(),
            &Base::ModuleRelative {
                name: "Module.so+0x40".to_string(),
                resolved: 0x8123_4560,
            }
        );
        assert_eq!(pointer.offsets(), &[0x10, 0x8]);
    }

    #[test]
    fn test_parse_module_relative_spacing() {
        let pointer = parse("[[Module.so+0x40 (= 0x81234560)] + 0x10] + 0x8").unwrap();
        assert_eq!(pointer.base().module_name(), Some("Module.so+0x40"));
        assert_eq!(pointer.base_address(), 0x8123_4560);
        assert_eq!(pointer.offsets(), &[0x10, 0x8]);

        let pointer = parse("[My Module.so+0x40 (=0x1000)] + 0x8").unwrap();
        assert_eq!(
            pointer.base(),
            &Base::ModuleRelative {
                name: "My Module.so+0x40".to_string(),
                resolved: 0x1000,
            }
        );
        assert_eq!(pointer.offsets(), &[0x8]);
    }

    #[test]
    fn test_parse_without_hex_header() {
        let pointer = parse("[[81234560] + 00000010] - 00000004").unwrap();
        assert_eq!(pointer, MemoryPointer::absolute(0x8123_4560, vec![0x10, -0x4]));
    }

    #[test]
    fn test_parse_extreme_offsets() {
        let pointer = parse("[[0x0] - 0x8000000000000000] + 0xFFFFFFFFFFFFFFFC").unwrap();
        assert_eq!(pointer.offsets(), &[i64::MIN, -4]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let cases = [
            "",
            "0x1000] + 0x10",
            "[0x1000 + 0x10",
            "[] + 0x10",
            "[0xZZZZ] + 0x10",
            "[0x1000] * 0x10",
            "[0x1000] + [0x10]",
            "[0x1000] + ",
            "[0x1000] + 0x",
            "[0x1000] + 0x10000000000000000",
            "[Module.so 0x40] + 0x10",
            "[Module.so (0x40)] + 0x10",
            "[Module.so (=0x40] + 0x10",
            "[ (=0x40)] + 0x10",
            "[0x1000]",
            "[[0x1000]",
            "[[[0x1000] + 0x10",
            "[[[[0x1000] + 0x10] + 0x20",
        ];

        for case in cases {
            let err = parse(case).unwrap_err();
            assert!(err.is_malformed(), "{case}");
            assert_eq!(err.text(), case);
        }
    }

    #[test]
    fn test_parse_list_skips_blank_lines() {
        let text = "[[0x1000] + 0x10] + 0x20\n\n[0x2000] - 0x8\r\n";
        let pointers = parse_list(text).unwrap();
        assert_eq!(
            pointers,
            vec![
                MemoryPointer::absolute(0x1000, vec![0x10, 0x20]),
                MemoryPointer::absolute(0x2000, vec![-0x8]),
            ]
        );
    }

    #[test]
    fn test_parse_depth_mismatch_reason() {
        match parse("[[[0x1000] + 0x10").unwrap_err() {
            Error::MalformedExpression { reason, .. } => {
                assert_eq!(reason, "expected 3 offsets for 3 '[' levels, found 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_list_reports_line() {
        let text = "[0x1000] + 0x10\n[0x2000] ? 0x8";
        match parse_list(text).unwrap_err() {
            Error::MalformedListEntry { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source.text(), "[0x2000] ? 0x8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
