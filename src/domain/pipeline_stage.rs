use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Validating,
    Gating,
    Recognizing,
    Extracting,
    Coercing,
    Persisting,
    Responding,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Validating => "VALIDATING",
            PipelineStage::Gating => "GATING",
            PipelineStage::Recognizing => "RECOGNIZING",
            PipelineStage::Extracting => "EXTRACTING",
            PipelineStage::Coercing => "COERCING",
            PipelineStage::Persisting => "PERSISTING",
            PipelineStage::Responding => "RESPONDING",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
