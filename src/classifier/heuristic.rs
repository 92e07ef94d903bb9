use super::TextClassifier;
use async_trait::async_trait;

/// Share of control bytes above which a sample is treated as binary.
const MAX_CONTROL_RATIO: f64 = 0.30;

/// Content heuristic that needs no external tool: any NUL byte, or too many
/// control bytes, marks the sample as binary.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        HeuristicClassifier
    }

    pub fn looks_like_text(sample: &[u8]) -> bool {
        if sample.is_empty() {
            return false;
        }
        if sample.contains(&0) {
            return false;
        }
        let control = sample
            .iter()
            .filter(|&&b| b < 0x20 && !matches!(b, b'\n' | b'\r' | b'\t' | 0x0c | 0x1b))
            .count();
        (control as f64) / (sample.len() as f64) <= MAX_CONTROL_RATIO
    }
}

#[async_trait]
impl TextClassifier for HeuristicClassifier {
    async fn is_text(&self, sample: &[u8]) -> bool {
        HeuristicClassifier::looks_like_text(sample)
    }
}
