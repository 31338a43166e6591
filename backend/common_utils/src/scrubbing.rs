//! Regex based redaction of request/response transcripts before they are logged.

use regex::Regex;

use crate::consts::FILTERED;

/// Ordered list of substitutions applied to a transcript.
///
/// Replacement templates use `regex` syntax, so capture groups surrounding the
/// secret can be preserved: `(<CVV>)[^<]*(</CVV>)` with `${1}[FILTERED]${2}`.
#[derive(Debug, Clone)]
pub struct TranscriptScrubber {
    rules: Vec<(Regex, String)>,
}

impl TranscriptScrubber {
    /// Compile the given `(pattern, replacement)` pairs. A pattern that fails to
    /// compile is logged and skipped so one bad rule cannot disable the others.
    pub fn new(rules: &[(&str, &str)]) -> Self {
        let rules = rules
            .iter()
            .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
                Ok(regex) => Some((regex, (*replacement).to_string())),
                Err(error) => {
                    tracing::error!(%pattern, ?error, "invalid scrubbing pattern skipped");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn scrub(&self, transcript: &str) -> String {
        self.rules
            .iter()
            .fold(transcript.to_string(), |acc, (regex, replacement)| {
                regex.replace_all(&acc, replacement.as_str()).into_owned()
            })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// `(<tag>)value(</tag>)` rule preserving the element, for XML transcripts.
pub fn xml_element_rule(tag: &str) -> (String, String) {
    (
        format!(r"(?i)(<{tag}>)[^<]*(</{tag}>)"),
        format!("${{1}}{FILTERED}${{2}}"),
    )
}

/// `"key":"value"` rule preserving the key, for JSON transcripts.
pub fn json_field_rule(key: &str) -> (String, String) {
    (
        format!(r#"("{key}\\?"\s*:\s*\\?"?)[^",}}\\]*"#),
        format!("${{1}}{FILTERED}"),
    )
}

/// `key=value` rule preserving the key, for form encoded transcripts.
pub fn form_field_rule(key: &str) -> (String, String) {
    (format!(r"({key}=)[^&\s]*"), format!("${{1}}{FILTERED}"))
}

/// Build a scrubber from owned rules produced by the helpers above.
pub fn from_owned_rules(rules: &[(String, String)]) -> TranscriptScrubber {
    let borrowed: Vec<(&str, &str)> = rules
        .iter()
        .map(|(pattern, replacement)| (pattern.as_str(), replacement.as_str()))
        .collect();
    TranscriptScrubber::new(&borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_rule_keeps_tags() {
        let scrubber = from_owned_rules(&[xml_element_rule("CardNumber")]);
        assert_eq!(
            scrubber.scrub("<CardNumber>4111111111111111</CardNumber><Amount>10</Amount>"),
            "<CardNumber>[FILTERED]</CardNumber><Amount>10</Amount>"
        );
    }

    #[test]
    fn json_rule_handles_strings_and_numbers() {
        let scrubber = from_owned_rules(&[json_field_rule("number"), json_field_rule("cvv")]);
        let scrubbed = scrubber.scrub(r#"{"number":"4242424242424242","cvv":100,"name":"x"}"#);
        assert_eq!(
            scrubbed,
            r#"{"number":"[FILTERED]","cvv":[FILTERED],"name":"x"}"#
        );
    }

    #[test]
    fn form_rule_stops_at_ampersand() {
        let scrubber = from_owned_rules(&[form_field_rule("sg_CVV2")]);
        assert_eq!(
            scrubber.scrub("sg_CardNumber=1&sg_CVV2=123&sg_Amount=1.00"),
            "sg_CardNumber=1&sg_CVV2=[FILTERED]&sg_Amount=1.00"
        );
    }

    #[test]
    fn invalid_pattern_is_skipped() {
        let scrubber = TranscriptScrubber::new(&[("(unclosed", "x"), ("secret", FILTERED)]);
        assert_eq!(scrubber.len(), 1);
        assert_eq!(scrubber.scrub("a secret"), "a [FILTERED]");
    }
}
