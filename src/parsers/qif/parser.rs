use super::normalizer::{DatePolicy, NormalizedRecord, normalize_all};
use super::tokenizer::tokenize;
use crate::errors::QifResult;
use crate::parsers::traits::Parser;

#[derive(Debug, Clone, Copy, Default)]
pub struct QifParser {
    date_policy: DatePolicy,
}

impl QifParser {
    pub fn new(date_policy: DatePolicy) -> Self {
        Self { date_policy }
    }

    pub fn date_policy(&self) -> DatePolicy {
        self.date_policy
    }
}

impl Parser for QifParser {
    type Output = NormalizedRecord;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        if let Some(name) = filename {
            if name.to_lowercase().ends_with(".qif") {
                return true;
            }
        }

        let starts_with_directive = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .is_some_and(|line| {
                ["!Type:", "!Account", "!Option:"]
                    .iter()
                    .any(|prefix| line.starts_with(prefix))
            });

        starts_with_directive || content.lines().any(|line| line.trim() == "^")
    }

    fn parse(&self, content: &str) -> QifResult<Vec<Self::Output>> {
        normalize_all(&tokenize(content), self.date_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QifParseError;
    use chrono::NaiveDate;
    use rstest::rstest;

    const SAMPLE_QIF: &str = r#"!Type:Bank
D2/ 1'24
T100.00
PExample Payee
MExample Memo
^
D2/ 2'24
T200.50
PAnother Payee
MAnother Memo
^
"#;

    #[rstest]
    #[case(Some("test.qif"), "", true)]
    #[case(Some("test.QIF"), "", true)]
    #[case(Some("test.csv"), "", false)]
    #[case(None, "!Type:Bank\nT1\n^", true)]
    #[case(None, "\n  !Account:Checking\n", true)]
    #[case(None, "!Option:AutoSwitch", true)]
    #[case(None, "D2/ 1'24\nT100.00\n^\n", true)]
    #[case(None, "random content", false)]
    #[case(None, "<OFX>", false)]
    #[case(Some("test.csv"), "Date,Amount\n2025-01-01,1.00", false)]
    fn test_is_supported(#[case] filename: Option<&str>, #[case] content: &str, #[case] expected: bool) {
        assert_eq!(QifParser::is_supported(filename, content), expected);
    }

    #[test]
    fn test_parse_bank_statement() {
        let records = QifParser::default().parse(SAMPLE_QIF).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(records[1].date(), NaiveDate::from_ymd_opt(2024, 2, 2));
        assert_eq!(records[1].raw('P'), Some("Another Payee"));
        assert_eq!(records[1].switch(), Some("!Type:Bank"));
        assert_eq!(records[1].kind(), "Bank");
    }

    #[test]
    fn test_parse_strict_bad_date_fails() {
        let result = QifParser::new(DatePolicy::Strict).parse("D7/17'24\n^\nD13/45'24\n^");
        assert!(matches!(result, Err(QifParseError::DateFormat(_))));
    }

    #[test]
    fn test_parse_lenient_bad_date_continues() {
        let records = QifParser::new(DatePolicy::Lenient)
            .parse("D7/17'24\n^\nD13/45'24\n^")
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date(), None);
        assert_eq!(records[1].issues().len(), 1);
    }

    #[test]
    fn test_parse_empty_content() {
        let records = QifParser::default().parse("   \n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_default_policy_is_strict() {
        assert_eq!(QifParser::default().date_policy(), DatePolicy::Strict);
    }
}
