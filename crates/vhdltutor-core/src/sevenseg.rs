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

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::LazyLock;

use regex::Regex;
use regex::RegexBuilder;

/// The pattern on the display before any simulation has run: digit zero on
/// the reference decoder.
pub const INITIAL_PATTERN: &str = "1111110";

/// The textual shape the mapper scans for: a 4-bit binary literal assigned
/// a 7-bit segment literal, e.g. `when "0000" => segmentos <= "1111110"`.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"when\s+"([01]{4})"\s*=>\s*segmentos\s*<=\s*"([01]{7})""#)
        .case_insensitive(true)
        .build()
        .expect("segment assignment expression")
});

/// A decimal digit 0-9, the meaningful half of the sixteen 4-bit encodings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);

    pub fn new(value: u8) -> Option<Digit> {
        if value <= 9 { Some(Digit(value)) } else { None }
    }

    /// Parse a 4-character binary literal. Values 10-15 are valid 4-bit
    /// encodings but not decimal digits, so they are filtered out rather
    /// than rejected as errors.
    pub fn from_bits(bits: &str) -> Option<Digit> {
        if bits.len() != 4 {
            return None;
        }
        let value = u8::from_str_radix(bits, 2).ok()?;
        Digit::new(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit as a 4-bit binary literal.
    pub fn bits(self) -> String {
        format!("{:04b}", self.0)
    }

    /// The next digit up, saturating at 9.
    pub fn succ(self) -> Digit {
        Digit(self.0.saturating_add(1).min(9))
    }

    /// The next digit down, saturating at 0.
    pub fn pred(self) -> Digit {
        Digit(self.0.saturating_sub(1))
    }

    pub fn all() -> impl Iterator<Item = Digit> {
        (0..=9).map(Digit)
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 7-character string of '0'/'1' flags, one per display segment a-g.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SegmentPattern(String);

impl SegmentPattern {
    pub fn new(flags: &str) -> Option<SegmentPattern> {
        let well_formed = flags.len() == 7 && flags.bytes().all(|b| b == b'0' || b == b'1');
        if well_formed {
            Some(SegmentPattern(flags.to_string()))
        } else {
            None
        }
    }

    /// The fixed default shown before any mapping has been computed.
    pub fn initial() -> SegmentPattern {
        SegmentPattern(INITIAL_PATTERN.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lit flags for segments a through g, in order.
    pub fn segments(&self) -> [bool; 7] {
        let mut lit = [false; 7];
        for (i, b) in self.0.bytes().enumerate() {
            lit[i] = b == b'1';
        }
        lit
    }
}

impl Display for SegmentPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A digit-to-segment lookup table.
pub type SegmentMap = BTreeMap<Digit, SegmentPattern>;

/// The result of scanning a buffer for decoder assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingOutcome {
    /// All ten digits are mapped.
    Complete(SegmentMap),
    /// At least one digit has no pairing; the partial table is discarded.
    Incomplete { missing: Vec<Digit> },
}

/// Scan a text buffer for `when "XXXX" => segmentos <= "YYYYYYY"` pairings
/// and build the digit-to-segment table.
///
/// Later pairings for the same digit overwrite earlier ones. The table is
/// complete only when all ten digits 0-9 are present.
pub fn extract_mapping(text: &str) -> MappingOutcome {
    let mut mapping = SegmentMap::new();
    for caps in ASSIGNMENT.captures_iter(text) {
        if let Some(digit) = Digit::from_bits(&caps[1]) {
            if let Some(pattern) = SegmentPattern::new(&caps[2]) {
                mapping.insert(digit, pattern);
            }
        }
    }
    let missing: Vec<Digit> = Digit::all().filter(|d| !mapping.contains_key(d)).collect();
    if missing.is_empty() {
        MappingOutcome::Complete(mapping)
    } else {
        MappingOutcome::Incomplete { missing }
    }
}

/// Session state of the seven-segment lab: the selected input digit, the
/// pattern currently on the display, and the last complete mapping.
#[derive(Debug, Clone)]
pub struct LabState {
    digit: Digit,
    active: SegmentPattern,
    mapping: Option<SegmentMap>,
}

impl LabState {
    pub fn new() -> LabState {
        LabState {
            digit: Digit::ZERO,
            active: SegmentPattern::initial(),
            mapping: None,
        }
    }

    pub fn digit(&self) -> Digit {
        self.digit
    }

    pub fn active(&self) -> &SegmentPattern {
        &self.active
    }

    pub fn mapping(&self) -> Option<&SegmentMap> {
        self.mapping.as_ref()
    }

    /// Run the mapper over a source buffer. A complete table replaces the
    /// retained mapping and re-displays the current digit; an incomplete
    /// table leaves both the display and the retained mapping unchanged.
    pub fn simulate(&mut self, source: &str) -> MappingOutcome {
        let outcome = extract_mapping(source);
        if let MappingOutcome::Complete(mapping) = &outcome {
            if let Some(pattern) = mapping.get(&self.digit) {
                self.active = pattern.clone();
            }
            self.mapping = Some(mapping.clone());
        }
        outcome
    }

    /// Change the input digit. The display is refreshed from the retained
    /// mapping without re-scanning any text; before the first successful
    /// simulation the display keeps its current pattern.
    pub fn select_digit(&mut self, digit: Digit) {
        self.digit = digit;
        if let Some(mapping) = &self.mapping {
            if let Some(pattern) = mapping.get(&digit) {
                self.active = pattern.clone();
            }
        }
    }
}

impl Default for LabState {
    fn default() -> Self {
        LabState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DECODER: &str = r#"
architecture behavioral of bcd_7seg is
begin
  process(entrada)
  begin
    case entrada is
      when "0000" => segmentos <= "1111110"; -- 0
      when "0001" => segmentos <= "0110000"; -- 1
      when "0010" => segmentos <= "1101101"; -- 2
      when "0011" => segmentos <= "1111001"; -- 3
      when "0100" => segmentos <= "0110011"; -- 4
      when "0101" => segmentos <= "1011011"; -- 5
      when "0110" => segmentos <= "1011111"; -- 6
      when "0111" => segmentos <= "1110000"; -- 7
      when "1000" => segmentos <= "1111111"; -- 8
      when "1001" => segmentos <= "1111011"; -- 9
      when others => segmentos <= "0000000";
    end case;
  end process;
end behavioral;
"#;

    #[test]
    fn test_full_decoder_is_complete() {
        match extract_mapping(FULL_DECODER) {
            MappingOutcome::Complete(mapping) => {
                assert_eq!(mapping.len(), 10);
                assert_eq!(mapping[&Digit::ZERO].as_str(), "1111110");
            }
            MappingOutcome::Incomplete { .. } => panic!("expected a complete mapping"),
        }
    }

    #[test]
    fn test_single_pairing_reports_missing_digits() {
        let text = r#"when "0000" => segmentos <= "1111110""#;
        match extract_mapping(text) {
            MappingOutcome::Incomplete { missing } => {
                let missing: Vec<u8> = missing.iter().map(|d| d.value()).collect();
                assert_eq!(missing, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
            }
            MappingOutcome::Complete(_) => panic!("expected an incomplete mapping"),
        }
    }

    #[test]
    fn test_out_of_range_literal_is_filtered() {
        // 1100 is 12: a valid 4-bit encoding, but not a decimal digit.
        let text = FULL_DECODER
            .replace(r#"when "0011" => segmentos <= "1111001"; -- 3"#, "")
            + r#"when "1100" => segmentos <= "1010101";"#;
        match extract_mapping(&text) {
            MappingOutcome::Incomplete { missing } => {
                assert_eq!(missing, vec![Digit::new(3).unwrap()]);
            }
            MappingOutcome::Complete(_) => panic!("expected an incomplete mapping"),
        }
    }

    #[test]
    fn test_later_pairing_overwrites_earlier() {
        let text = FULL_DECODER.to_string() + r#"when "0000" => segmentos <= "0000001";"#;
        match extract_mapping(&text) {
            MappingOutcome::Complete(mapping) => {
                assert_eq!(mapping[&Digit::ZERO].as_str(), "0000001");
            }
            MappingOutcome::Incomplete { .. } => panic!("expected a complete mapping"),
        }
    }

    #[test]
    fn test_extraction_is_case_insensitive() {
        let text = FULL_DECODER.to_uppercase();
        assert!(matches!(
            extract_mapping(&text),
            MappingOutcome::Complete(_)
        ));
    }

    #[test]
    fn test_lab_initial_state() {
        let lab = LabState::new();
        assert_eq!(lab.digit(), Digit::ZERO);
        assert_eq!(lab.active().as_str(), INITIAL_PATTERN);
        assert!(lab.mapping().is_none());
    }

    #[test]
    fn test_simulate_then_select_digit() {
        let mut lab = LabState::new();
        let outcome = lab.simulate(FULL_DECODER);
        assert!(matches!(outcome, MappingOutcome::Complete(_)));
        assert_eq!(lab.active().as_str(), "1111110");

        // Selecting a digit re-displays from the retained mapping; no
        // further scan of the source happens.
        lab.select_digit(Digit::new(5).unwrap());
        assert_eq!(lab.active().as_str(), "1011011");
    }

    #[test]
    fn test_incomplete_simulation_changes_nothing() {
        let mut lab = LabState::new();
        lab.simulate(FULL_DECODER);
        lab.select_digit(Digit::new(8).unwrap());
        assert_eq!(lab.active().as_str(), "1111111");

        // Nine of ten digits: the display and the retained mapping keep
        // their previous values.
        let nine = FULL_DECODER.replace(r#"when "0100" => segmentos <= "0110011"; -- 4"#, "");
        let outcome = lab.simulate(&nine);
        assert!(matches!(outcome, MappingOutcome::Incomplete { .. }));
        assert_eq!(lab.active().as_str(), "1111111");
        lab.select_digit(Digit::new(4).unwrap());
        assert_eq!(lab.active().as_str(), "0110011");
    }

    #[test]
    fn test_select_digit_before_any_mapping() {
        let mut lab = LabState::new();
        lab.select_digit(Digit::new(7).unwrap());
        assert_eq!(lab.digit().value(), 7);
        assert_eq!(lab.active().as_str(), INITIAL_PATTERN);
    }

    #[test]
    fn test_digit_stepping_saturates() {
        assert_eq!(Digit::ZERO.pred(), Digit::ZERO);
        assert_eq!(Digit::new(9).unwrap().succ().value(), 9);
        assert_eq!(Digit::new(4).unwrap().succ().value(), 5);
        assert_eq!(Digit::new(4).unwrap().pred().value(), 3);
    }

    #[test]
    fn test_digit_bits() {
        assert_eq!(Digit::new(9).unwrap().bits(), "1001");
        assert_eq!(Digit::ZERO.bits(), "0000");
        assert_eq!(Digit::from_bits("1001"), Digit::new(9));
        assert_eq!(Digit::from_bits("1100"), None);
        assert_eq!(Digit::from_bits("10011"), None);
    }

    #[test]
    fn test_segment_pattern_validation() {
        assert!(SegmentPattern::new("1111110").is_some());
        assert!(SegmentPattern::new("111111").is_none());
        assert!(SegmentPattern::new("11111102").is_none());
        assert!(SegmentPattern::new("11111a0").is_none());
        let pattern = SegmentPattern::new("1011011").unwrap();
        assert_eq!(
            pattern.segments(),
            [true, false, true, true, false, true, true]
        );
    }
}
