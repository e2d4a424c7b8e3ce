// ============================================================================
// Symbol Tables
// Per-dialect glyphs used by the renderer
// ============================================================================

use crate::domain::{FormatOptions, Mode};

/// Glyphs for one output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolTable {
    /// Multiplication
    pub times: &'static str,
    /// Alternate multiplication
    pub times_alt: &'static str,
    /// Plus-minus
    pub plus_minus: &'static str,
    pub paren_open: &'static str,
    pub paren_close: &'static str,
    /// Super/subscript group open
    pub group_open: &'static str,
    /// Super/subscript group close
    pub group_close: &'static str,
    /// Small space before an asymmetric pair
    pub pair_space: &'static str,
    pub text_open: &'static str,
    pub text_close: &'static str,
}

const TERMINAL: SymbolTable = SymbolTable {
    times: "×",
    times_alt: "·",
    plus_minus: "±",
    paren_open: "(",
    paren_close: ")",
    group_open: "",
    group_close: "",
    pair_space: "",
    text_open: "",
    text_close: "",
};

const TEX: SymbolTable = SymbolTable {
    times: " \\times ",
    times_alt: "\\cdot",
    plus_minus: "\\pm",
    paren_open: "\\left( ",
    paren_close: " \\right)",
    group_open: "{",
    group_close: "}",
    pair_space: "\\,",
    text_open: "\\text{",
    text_close: "}",
};

const TYPST: SymbolTable = SymbolTable {
    times: " times ",
    times_alt: " dot.op ",
    plus_minus: " plus.minus ",
    paren_open: "(",
    paren_close: ")",
    group_open: "(",
    group_close: ")",
    pair_space: "#h(0.0em)",
    text_open: "\"",
    text_close: "\"",
};

const GNUPLOT: SymbolTable = SymbolTable {
    times: "×",
    times_alt: "· ",
    plus_minus: "±",
    paren_open: "(",
    paren_close: ")",
    group_open: "{",
    group_close: "}",
    pair_space: "",
    text_open: "",
    text_close: "",
};

impl SymbolTable {
    /// Table for a dialect.
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Terminal => TERMINAL,
            Mode::Tex => TEX,
            Mode::Typst => TYPST,
            Mode::Gnuplot => GNUPLOT,
        }
    }

    /// Replace the Unicode glyphs with ASCII; brackets stay dialect-specific.
    pub const fn ascii(self) -> Self {
        Self {
            times: "x",
            times_alt: ".",
            plus_minus: "+/-",
            ..self
        }
    }

    /// Table selected by `options`.
    pub fn for_options(options: &FormatOptions) -> Self {
        let table = Self::for_mode(options.mode);
        if options.no_utf8 {
            table.ascii()
        } else {
            table
        }
    }

    /// Multiplication glyph honoring the alternate-symbol option.
    #[inline]
    pub fn multiplication(&self, alternate: bool) -> &'static str {
        if alternate {
            self.times_alt
        } else {
            self.times
        }
    }
}
