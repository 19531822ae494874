//! The five sections of the tour. Each section prints to any `io::Write`
//! sink and hands its sample arrays to the next one.

pub mod creation;
pub mod math;
pub mod perf;
pub mod reshape;
pub mod storage;

use std::fmt::Display;
use std::io::{self, Write};

/// Width of the `=` rules framing section titles.
pub(crate) const RULE_WIDTH: usize = 70;

pub(crate) fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub(crate) fn section_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "{}", title)?;
    rule(out)
}

pub(crate) fn subheading<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "\n--- {} ---", text)
}

/// Prints `label:` followed by `value` on the next line.
pub(crate) fn labelled<W, T>(out: &mut W, label: &str, value: T) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    writeln!(out, "\n{}:\n{}", label, value)
}

/// Formats `n` with `,` between groups of three digits.
pub fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
