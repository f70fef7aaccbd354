//! Shader stage kinds

/// Pipeline stage a shader object compiles for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Programmable vertex processor
    Vertex,
    /// Programmable fragment processor
    Fragment,
    /// Programmable geometry processor
    Geometry,
    /// Tessellation control stage
    TessControl,
    /// Tessellation evaluation stage
    TessEvaluation,
    /// Compute processor
    Compute,
}

impl StageKind {
    /// Upper-case tag used in compile errors
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Vertex => "VERTEX",
            StageKind::Fragment => "FRAGMENT",
            StageKind::Geometry => "GEOMETRY",
            StageKind::TessControl => "TESS_CONTROL",
            StageKind::TessEvaluation => "TESS_EVALUATION",
            StageKind::Compute => "COMPUTE",
        }
    }

    /// True for every stage that can take part in a graphics pipeline
    pub fn is_graphics(&self) -> bool {
        !matches!(self, StageKind::Compute)
    }
}
