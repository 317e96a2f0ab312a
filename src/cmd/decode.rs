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

use std::fs::read_to_string;

use vhdltutor_core::error::Fallible;
use vhdltutor_core::error::fail;
use vhdltutor_core::sevenseg::MappingOutcome;
use vhdltutor_core::sevenseg::extract_mapping;

/// Extract the digit-to-segment table from a VHDL source file and print it:
/// the command-line counterpart of the lab's Simulate button.
pub fn decode_file(path: &str) -> Fallible<()> {
    let text = read_to_string(path)?;
    match extract_mapping(&text) {
        MappingOutcome::Complete(mapping) => {
            println!("digit  bcd   segments (abcdefg)");
            for (digit, pattern) in &mapping {
                println!("{digit}      {}  {pattern}", digit.bits());
            }
            Ok(())
        }
        MappingOutcome::Incomplete { missing } => {
            let missing: Vec<String> = missing.iter().map(|d| d.to_string()).collect();
            fail(format!(
                "Incomplete mapping: no pairing found for digit(s) {}.",
                missing.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_decode_complete_file() -> Fallible<()> {
        let source = r#"
      when "0000" => segmentos <= "1111110";
      when "0001" => segmentos <= "0110000";
      when "0010" => segmentos <= "1101101";
      when "0011" => segmentos <= "1111001";
      when "0100" => segmentos <= "0110011";
      when "0101" => segmentos <= "1011011";
      when "0110" => segmentos <= "1011111";
      when "0111" => segmentos <= "1110000";
      when "1000" => segmentos <= "1111111";
      when "1001" => segmentos <= "1111011";
"#;
        let dir = tempdir()?;
        let path = dir.path().join("bcd_7seg.vhd");
        write(&path, source)?;
        decode_file(path.to_str().unwrap())
    }

    #[test]
    fn test_decode_incomplete_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("partial.vhd");
        write(&path, r#"when "0000" => segmentos <= "1111110";"#)?;
        assert!(decode_file(path.to_str().unwrap()).is_err());
        Ok(())
    }
}
