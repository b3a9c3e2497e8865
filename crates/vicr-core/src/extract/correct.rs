//! OCR error correction for identifier fields.
//!
//! These substitutions only make sense inside an engine number or a VIN and
//! would corrupt keyword matching if applied to the document text, so they
//! run on extracted values only.

use super::validate::RecordDraft;

/// Substitutions applied to engine numbers.
const ENGINE_NO_FIXES: &[(char, char)] = &[('O', '0')];

/// Substitutions applied to VINs; a VIN never contains I, O or Q.
const VIN_FIXES: &[(char, char)] = &[('O', '0'), ('I', '1'), ('Q', '0')];

fn substitute(value: &str, fixes: &[(char, char)]) -> String {
    value
        .chars()
        .map(|c| {
            fixes
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

/// Correct an extracted engine number.
pub fn correct_engine_no(engine_no: &str) -> String {
    substitute(engine_no, ENGINE_NO_FIXES)
}

/// Correct an extracted VIN: drop stray spaces and dashes, then fix letters
/// that cannot appear in a VIN.
pub fn correct_vin(vin: &str) -> String {
    let compact: String = vin
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    substitute(&compact, VIN_FIXES)
}

/// Apply identifier corrections to a draft record. Other fields are untouched.
pub fn correct_identifiers(draft: &mut RecordDraft) {
    if let Some(engine_no) = draft.engine_no.as_mut() {
        *engine_no = correct_engine_no(engine_no);
    }
    if let Some(vin) = draft.vin.as_mut() {
        *vin = correct_vin(vin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_vin_letter_o() {
        let vin = correct_vin("JM0BK1OF2OO4O593O");
        assert!(!vin.contains('O'));
        assert_eq!(vin, "JM0BK10F200405930");
    }

    #[test]
    fn test_correct_vin_strips_separators_first() {
        assert_eq!(correct_vin("JM0BK1OF2-OO4O 593O"), "JM0BK10F200405930");
    }

    #[test]
    fn test_correct_vin_i_and_q() {
        assert_eq!(correct_vin("1HGCM8263IA0Q4352"), "1HGCM82631A004352");
    }

    #[test]
    fn test_correct_engine_no_only_o() {
        assert_eq!(correct_engine_no("LF1O525984"), "LF10525984");
        assert_eq!(correct_engine_no("QIO"), "QI0");
    }

    #[test]
    fn test_correct_identifiers_leaves_other_fields() {
        let mut draft = RecordDraft {
            engine_no: Some("LFO1".to_string()),
            vin: Some("JM0 BKO".to_string()),
            model: Some("Neo".to_string()),
            registration: Some("OOO111".to_string()),
            ..Default::default()
        };
        correct_identifiers(&mut draft);

        assert_eq!(draft.engine_no.as_deref(), Some("LF01"));
        assert_eq!(draft.vin.as_deref(), Some("JM0BK0"));
        assert_eq!(draft.model.as_deref(), Some("Neo"));
        assert_eq!(draft.registration.as_deref(), Some("OOO111"));
    }
}
