/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Dedenting and line-folding, shared by the `folded`
//! conversion specifier and multi-line quoted strings.

use std::convert::Infallible;

/// Strip the longest common leading-space prefix shared by
/// all non-empty lines.
pub(crate) fn dedent(lines: &[String]) -> Vec<String>
{
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.len() >= common
            {
                l[common..].to_string()
            }
            else
            {
                String::new()
            }
        })
        .collect()
}

/// Fold a block of (already right-trimmed) lines per the
/// rules: dedent, drop leading/trailing empty lines, then
/// join -- an empty line becomes `\n`, and the non-empty line
/// immediately following one is not given a leading space; a
/// non-empty line that itself starts with whitespace is never
/// given a leading separator either.
pub(crate) fn fold_lines(lines: &[String]) -> String
{
    fold_with::<Infallible>(lines, |_, line| Ok(line.to_string())).unwrap_or_default()
}

/// Generalisation of [`fold_lines`] allowing each non-empty
/// line to be transformed (by original index into `lines`)
/// before it is appended to the result. Used by multi-line
/// quoted strings, where each physical line must be unescaped
/// using its own source line number for diagnostics -- the
/// separator logic below still looks at the raw, un-escaped
/// line, matching the original fold-then-unescape order.
pub(crate) fn fold_with<E>(
    lines: &[String],
    mut transform: impl FnMut(usize, &str) -> Result<String, E>,
) -> Result<String, E>
{
    let dedented = dedent(lines);

    let Some(first) = dedented.iter().position(|l| !l.trim().is_empty()) else {
        return Ok(String::new());
    };
    let last = dedented.iter().rposition(|l| !l.trim().is_empty()).unwrap();

    let mut out = String::new();
    let mut prev_was_empty = true;
    let mut first_line = true;

    for (i, line) in dedented.iter().enumerate().take(last + 1).skip(first)
    {
        let is_empty = line.trim().is_empty();

        if is_empty
        {
            out.push('\n');
            prev_was_empty = true;
            first_line = false;
            continue;
        }

        if !first_line && !prev_was_empty && !line.starts_with(' ') && !line.starts_with('\t')
        {
            out.push(' ');
        }

        out.push_str(&transform(i, line)?);
        prev_was_empty = false;
        first_line = false;
    }

    Ok(out)
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(v: &[&str]) -> Vec<String>
    {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn simple_join_with_spaces()
    {
        assert_eq!(fold_lines(&lines(&["one", "two", "three"])), "one two three");
    }

    #[test]
    fn blank_line_becomes_newline()
    {
        assert_eq!(fold_lines(&lines(&["one", "", "two"])), "one\ntwo");
    }

    #[test]
    fn leading_and_trailing_blanks_dropped()
    {
        assert_eq!(fold_lines(&lines(&["", "one", "two", ""])), "one two");
    }

    #[test]
    fn indented_line_gets_no_separator()
    {
        assert_eq!(fold_lines(&lines(&["one", "  two"])), "one  two");
    }

    #[test]
    fn dedent_strips_common_prefix()
    {
        assert_eq!(dedent(&lines(&["  a", "  b"])), lines(&["a", "b"]));
    }

    #[test]
    fn dedent_ignores_blank_lines_for_common_prefix_computation()
    {
        assert_eq!(dedent(&lines(&["  a", "", "  b"])), lines(&["a", "", "b"]));
    }

    #[test]
    fn fold_with_transforms_only_nonblank_lines_by_original_index()
    {
        let seen = std::cell::RefCell::new(Vec::new());
        let out = fold_with::<Infallible>(&lines(&["one", "", "two"]), |i, l| {
            seen.borrow_mut().push(i);
            Ok(l.to_uppercase())
        })
        .unwrap();

        assert_eq!(out, "ONE\nTWO");
        assert_eq!(*seen.borrow(), vec![0, 2]);
    }
}
