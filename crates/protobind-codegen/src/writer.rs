//! Line buffer with indentation tracking for the dialect templates.

/// Accumulates generated source one line at a time.
///
/// Writing to a `String` cannot fail, so unlike a `fmt::Write` wrapper every
/// method is infallible and chainable.
pub struct CodeBuffer {
    output: String,
    unit: &'static str,
    indent: usize,
}

impl CodeBuffer {
    /// Start at indentation level zero, indenting by `unit` (e.g. `"\t"`).
    pub fn new(unit: &'static str) -> Self {
        Self::at_level(unit, 0)
    }

    /// Start already nested `indent` levels deep, for fragments that are
    /// spliced into an enclosing template.
    pub fn at_level(unit: &'static str, indent: usize) -> Self {
        Self {
            output: String::new(),
            unit,
            indent,
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(self.unit);
        }
    }

    /// Write one indented line. Empty text writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            self.write_indent();
            self.output.push_str(text);
        }
        self.output.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Write `header` and indent what follows.
    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(header);
        self.indent += 1;
        self
    }

    /// Dedent and write `footer`.
    pub fn close(&mut self, footer: impl AsRef<str>) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line(footer)
    }

    /// Dedent, write `text`, and indent again: `} else {`.
    pub fn reopen(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
        self.indent += 1;
        self
    }

    /// Dedent without writing anything, closing a block that has no footer
    /// (e.g. a `case` body).
    pub fn dedent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    /// Write each line of an indented `lines` block.
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
        self
    }

    /// Append pre-rendered text as-is.
    pub fn raw(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.output.push_str(text.as_ref());
        self
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_blocks() {
        let mut buf = CodeBuffer::new("  ");
        buf.open("class A {")
            .line("x = 1")
            .open("f() {")
            .line("return x")
            .close("}")
            .close("}");
        assert_eq!(buf.finish(), "class A {\n  x = 1\n  f() {\n    return x\n  }\n}\n");
    }

    #[test]
    fn starting_level_and_blank_lines() {
        let mut buf = CodeBuffer::at_level("\t", 2);
        buf.line("a").line("").blank().raw("b\n");
        assert_eq!(buf.finish(), "\t\ta\n\n\nb\n");
    }

    #[test]
    fn reopen_continues_a_block() {
        let mut buf = CodeBuffer::new("  ");
        buf.open("if (a) {").line("x()").reopen("} else {").line("y()").close("}");
        assert_eq!(buf.finish(), "if (a) {\n  x()\n} else {\n  y()\n}\n");
    }

    #[test]
    fn close_never_underflows() {
        let mut buf = CodeBuffer::new("  ");
        buf.close("}").line("x");
        assert_eq!(buf.finish(), "}\nx\n");
    }
}
