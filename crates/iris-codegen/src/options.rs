//! Output options.

/// How markup is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// One element per line with indentation; otherwise a single line.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent_size: usize,
    /// Drop repeated classes from `className` string attributes.
    pub remove_duplicates: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent_size: 2,
            remove_duplicates: true,
        }
    }
}

impl FormatOptions {
    /// Single-line output.
    pub fn minified() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn with_remove_duplicates(mut self, remove_duplicates: bool) -> Self {
        self.remove_duplicates = remove_duplicates;
        self
    }
}

/// Options for turning a tree into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Wrap several top-level elements in `<React.Fragment>`. When unset they
    /// are wrapped in a vertical stack instead.
    pub use_fragment: bool,
    pub format: FormatOptions,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            use_fragment: true,
            format: FormatOptions::default(),
        }
    }
}

impl CompileOptions {
    pub fn with_fragment(mut self, use_fragment: bool) -> Self {
        self.use_fragment = use_fragment;
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.format.pretty = pretty;
        self
    }

    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.format.indent_size = indent_size;
        self
    }

    pub fn with_remove_duplicates(mut self, remove_duplicates: bool) -> Self {
        self.format.remove_duplicates = remove_duplicates;
        self
    }
}
