// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use regex::Regex;
use regex::RegexBuilder;

use crate::error::Fallible;

/// A regular expression that must match somewhere in submitted code for an
/// exercise to pass.
///
/// Patterns are compiled case-insensitively and with `.` matching line
/// breaks, so a single pattern can require structure spanning several lines
/// of a source buffer.
#[derive(Debug, Clone)]
pub struct RequiredPattern {
    source: String,
    regex: Regex,
}

impl RequiredPattern {
    pub fn new(expr: &str) -> Fallible<Self> {
        let regex = RegexBuilder::new(expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(RequiredPattern {
            source: expr.to_string(),
            regex,
        })
    }

    /// Whether the pattern matches anywhere in the buffer.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The expression this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_insensitive() -> Fallible<()> {
        let pattern = RequiredPattern::new(r"y\s*<=\s*a\s+and\s+b")?;
        assert!(pattern.is_match("Y <= A AND B;"));
        assert!(pattern.is_match("y <= a and b;"));
        Ok(())
    }

    #[test]
    fn test_match_spans_line_breaks() -> Fallible<()> {
        let pattern = RequiredPattern::new(r"entity\s+gate.*Port.*y\s*:\s*out")?;
        let text = "entity gate is\n  Port (\n    y : out std_logic\n  );\nend gate;";
        assert!(pattern.is_match(text));
        Ok(())
    }

    #[test]
    fn test_no_match() -> Fallible<()> {
        let pattern = RequiredPattern::new(r"y\s*<=\s*not\s+a")?;
        assert!(!pattern.is_match("y <= a and b;"));
        Ok(())
    }

    #[test]
    fn test_invalid_expression() {
        let result = RequiredPattern::new(r"(unclosed");
        assert!(result.is_err());
    }
}
