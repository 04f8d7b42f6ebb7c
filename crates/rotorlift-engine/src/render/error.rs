use thiserror::Error;

/// Renderer setup failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The shader module reported errors during compilation.
    #[error("shader `{label}` failed to compile:\n{diagnostics}")]
    ShaderCompilation {
        label: &'static str,
        diagnostics: String,
    },

    /// Pipeline creation failed validation.
    #[error("pipeline `{label}` is invalid: {reason}")]
    Pipeline { label: &'static str, reason: String },
}
