use serde::Serialize;

/// Descriptive metadata shown alongside assessments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub disclaimer: &'static str,
    pub note: &'static str,
}

pub const TOOL_METADATA: ToolMetadata = ToolMetadata {
    title: "Chronic Kidney Disease Prediction Tool",
    description: "A tool to assess risk factors for chronic kidney disease (CKD) and provide personalized recommendations.",
    version: "1.0",
    disclaimer: "This tool is for informational purposes only and is not a substitute for professional medical advice, diagnosis, or treatment.",
    note: "This tool cannot diagnose CKD. Only blood tests (eGFR) and urine tests (ACR) can confirm kidney disease.",
};
