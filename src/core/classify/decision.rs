use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Keep,
    Remove,
}

/// What the classifier saw when it decided
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    ColorDistance {
        distance: f64,
        threshold: f64,
    },
    Spelling {
        words: Vec<String>,
        misspelled: Vec<String>,
        /// No word survived the length filter
        no_words: bool,
    },
    Token {
        token: String,
        confidence: f32,
    },
    NoQualifyingToken {
        tokens_seen: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub evidence: Evidence,
}

impl Decision {
    pub fn keep(evidence: Evidence) -> Self {
        Self {
            verdict: Verdict::Keep,
            evidence,
        }
    }

    pub fn remove(evidence: Evidence) -> Self {
        Self {
            verdict: Verdict::Remove,
            evidence,
        }
    }

    pub fn is_remove(&self) -> bool {
        self.verdict == Verdict::Remove
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evidence::ColorDistance { distance, .. } => write!(f, "Color Distance: {:.2}", distance),
            Evidence::Spelling {
                words, no_words: true, ..
            } => write!(f, "no words to check -> {:?}", words),
            Evidence::Spelling {
                words, misspelled, ..
            } => write!(f, "words {:?}, misspelled {:?}", words, misspelled),
            Evidence::Token { token, confidence } => {
                write!(f, "token {:?} conf {:.1}", token, confidence)
            }
            Evidence::NoQualifyingToken { tokens_seen } => {
                write!(f, "no qualifying token among {}", tokens_seen)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_evidence() {
        let color = Evidence::ColorDistance {
            distance: 147.2243,
            threshold: 85.0,
        };
        assert_eq!(color.to_string(), "Color Distance: 147.22");

        let token = Evidence::Token {
            token: "HELLO".to_string(),
            confidence: 90.0,
        };
        assert_eq!(token.to_string(), "token \"HELLO\" conf 90.0");
    }

    #[test]
    fn test_serialize_decision() {
        let decision = Decision::remove(Evidence::Token {
            token: "HELLO".to_string(),
            confidence: 90.0,
        });
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["verdict"], "remove");
        assert_eq!(json["evidence"]["kind"], "token");
        assert_eq!(json["evidence"]["token"], "HELLO");
    }
}
