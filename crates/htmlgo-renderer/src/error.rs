/// Document assembly failure.
///
/// Diagram failures are never reported here; they degrade to client-side
/// rendering instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("failed to assemble {dialect} document: {source}")]
    Assembly {
        dialect: crate::Dialect,
        #[source]
        source: std::fmt::Error,
    },
}

impl RenderError {
    pub(crate) fn assembly(dialect: crate::Dialect) -> impl FnOnce(std::fmt::Error) -> Self {
        move |source| Self::Assembly { dialect, source }
    }
}
