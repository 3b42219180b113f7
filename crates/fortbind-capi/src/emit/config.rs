//! Configuration for C fragment emission.

/// Options controlling emitted C text.
#[derive(Clone, Debug)]
pub struct EmitConfig {
    /// Emit converters with internal (`static`) linkage.
    pub(crate) static_linkage: bool,
    /// Prefix for converter error-context strings, usually the wrapped
    /// module's name.
    pub(crate) errmess_prefix: Option<String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            static_linkage: true,
            errmess_prefix: None,
        }
    }
}

impl EmitConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether converters get internal linkage.
    pub fn static_linkage(mut self, value: bool) -> Self {
        self.static_linkage = value;
        self
    }

    /// Set the error-context prefix.
    pub fn errmess_prefix(mut self, value: impl Into<String>) -> Self {
        self.errmess_prefix = Some(value.into());
        self
    }
}
