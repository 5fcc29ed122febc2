use std::fs;

use crate::{document::QifDocument, errors::QifParseError, parsers::prelude::*, types::Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Qif(NormalizedRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "qif")]
    Qif,
}

/// Parse settings callers can keep in their own configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub date_policy: DatePolicy,
}

impl FileFormat {
    fn parse_document(&self, content: &str, options: ParseOptions) -> Result<QifDocument, QifParseError> {
        match self {
            FileFormat::Qif => QifParser::new(options.date_policy)
                .parse(content)
                .map(QifDocument::from),
        }
    }

    fn parse_raw(&self, content: &str, options: ParseOptions) -> Result<Vec<ParsedRecord>, QifParseError> {
        match self {
            FileFormat::Qif => {
                let document = self.parse_document(content, options)?;
                Ok(document.into_records().into_iter().map(ParsedRecord::Qif).collect())
            }
        }
    }

    fn parse<T>(&self, content: &str, options: ParseOptions) -> Result<Vec<T>, QifParseError>
    where
        T: TryFrom<ParsedRecord, Error = QifParseError>,
    {
        self.parse_raw(content, options)?
            .into_iter()
            .map(T::try_from)
            .collect()
    }

    fn detect(filename: Option<&str>, content: Option<&str>) -> Result<Self, QifParseError> {
        if let Some(content) = content {
            if QifParser::is_supported(filename, content) {
                return Ok(FileFormat::Qif);
            }
        }

        if let Some(filename) = filename {
            if let Some(ext) = filename.split('.').next_back() {
                if ext.eq_ignore_ascii_case("qif") {
                    return Ok(FileFormat::Qif);
                }
            }
        }

        Err(QifParseError::UnsupportedFormat)
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    format: Option<FileFormat>,
    options: ParseOptions,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn date_policy(mut self, policy: DatePolicy) -> Self {
        self.options.date_policy = policy;
        self
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parse(self) -> Result<Vec<Transaction>, QifParseError> {
        self.parse_into::<Transaction>()
    }

    pub fn parse_into<T>(self) -> Result<Vec<T>, QifParseError>
    where
        T: TryFrom<ParsedRecord, Error = QifParseError>,
    {
        let options = self.options;
        let (format, content) = self.resolve()?;
        format.parse(&content, options)
    }

    /// Parses into the column-addressable document instead of typed rows.
    pub fn parse_document(self) -> Result<QifDocument, QifParseError> {
        let options = self.options;
        let (format, content) = self.resolve()?;
        format.parse_document(&content, options)
    }

    fn resolve(self) -> Result<(FileFormat, String), QifParseError> {
        let format = self.format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(
                self.filepath.as_deref(),
                self.content.as_deref(),
            ))?;

        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .ok_or(QifParseError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        Ok((format, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_QIF: &str = r#"!Type:Bank
D2/ 1'24
T100.00
PExample Payee
MExample Memo
^
"#;

    #[test]
    fn test_builder_missing_content() {
        let result: Result<Vec<Transaction>, _> = ParserBuilder::new().parse();
        assert!(matches!(result, Err(QifParseError::UnsupportedFormat)));
    }

    #[test]
    fn test_builder_new() {
        let builder = ParserBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.format.is_none());
        assert_eq!(builder.options.date_policy, DatePolicy::Strict);
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ParserBuilder::new()
            .content("content")
            .filename("file.qif")
            .format(FileFormat::Qif)
            .date_policy(DatePolicy::Lenient);

        assert_eq!(builder.content.as_deref(), Some("content"));
        assert_eq!(builder.filepath.as_deref(), Some("file.qif"));
        assert_eq!(builder.format, Some(FileFormat::Qif));
        assert_eq!(builder.options.date_policy, DatePolicy::Lenient);
    }

    #[rstest]
    #[case(Some(FileFormat::Qif), None, "Explicit format")]
    #[case(None, None, "Auto-detect by content")]
    #[case(None, Some("statement.qif"), "Auto-detect by filename")]
    #[case(None, Some("statement.QIF"), "Auto-detect by uppercase extension")]
    fn test_parse_with_different_detection_methods(
        #[case] format: Option<FileFormat>,
        #[case] filename: Option<&str>,
        #[case] _description: &str,
    ) {
        let mut builder = ParserBuilder::new().content(SAMPLE_QIF);

        if let Some(fmt) = format {
            builder = builder.format(fmt);
        }
        if let Some(fname) = filename {
            builder = builder.filename(fname);
        }

        let transactions = builder.parse().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_type, "Bank");
        assert_eq!(transactions[0].amount, Some(Decimal::from_str("100.00").unwrap()));
    }

    #[rstest]
    #[case(None, Some(SAMPLE_QIF), true)]
    #[case(Some("statement.qif"), None, true)]
    #[case(Some("statement.QIF"), Some("anything"), true)]
    #[case(Some("statement.csv"), Some("random content"), false)]
    #[case(None, None, false)]
    #[case(Some("statement.txt"), Some("not qif"), false)]
    fn test_file_format_detect(
        #[case] filename: Option<&str>,
        #[case] content: Option<&str>,
        #[case] should_succeed: bool,
    ) {
        let result = FileFormat::detect(filename, content);
        if should_succeed {
            assert_eq!(result.unwrap(), FileFormat::Qif);
        } else {
            assert!(matches!(result, Err(QifParseError::UnsupportedFormat)));
        }
    }

    #[test]
    fn test_parse_raw() {
        let parsed = FileFormat::Qif.parse_raw(SAMPLE_QIF, ParseOptions::default()).unwrap();
        assert_eq!(parsed.len(), 1);

        match &parsed[0] {
            ParsedRecord::Qif(record) => {
                assert_eq!(record.raw('P'), Some("Example Payee"));
                assert_eq!(record.switch(), Some("!Type:Bank"));
            }
        }
    }

    #[test]
    fn test_parse_document() {
        let document = ParserBuilder::new().content(SAMPLE_QIF).parse_document().unwrap();
        assert_eq!(document.len(), 1);
        assert!(document.columns().contains(&"Payee".to_string()));
    }

    #[test]
    fn test_parse_no_content_no_filepath() {
        let result = ParserBuilder::new().format(FileFormat::Qif).parse();
        assert!(matches!(result, Err(QifParseError::MissingContentAndFilepath)));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = ParserBuilder::new()
            .filename("definitely/not/here.qif")
            .parse();
        assert!(matches!(result, Err(QifParseError::ReadContentFailed(_))));
    }

    #[test]
    fn test_parse_from_file() {
        let path = std::env::temp_dir().join("qif_statement_rs_builder_test.qif");
        fs::write(&path, SAMPLE_QIF).unwrap();

        let result = ParserBuilder::new().filename(path.to_str().unwrap()).parse();
        fs::remove_file(&path).unwrap();

        let transactions = result.unwrap();
        assert_eq!(transactions[0].date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_strict_and_lenient_policies() {
        let content = "!Type:Bank\nD13/45'24\nT1\n^";

        let strict = ParserBuilder::new().content(content).parse();
        assert!(matches!(strict, Err(QifParseError::DateFormat(_))));

        let lenient = ParserBuilder::new()
            .content(content)
            .options(ParseOptions { date_policy: DatePolicy::Lenient })
            .parse()
            .unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient[0].date, None);
    }

    #[test]
    fn test_parse_unsupported_format() {
        let result = ParserBuilder::new()
            .content("random content that's not QIF")
            .parse();
        assert!(matches!(result, Err(QifParseError::UnsupportedFormat)));
    }

    #[test]
    fn test_parse_options_serialization() {
        let options: ParseOptions = serde_json::from_str(r#"{"date_policy":"lenient"}"#).unwrap();
        assert_eq!(options.date_policy, DatePolicy::Lenient);

        let defaulted: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted.date_policy, DatePolicy::Strict);
    }

    #[test]
    fn test_file_format_serialization() {
        let json = serde_json::to_string(&FileFormat::Qif).unwrap();
        assert_eq!(json, "\"qif\"");

        let deserialized: FileFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, FileFormat::Qif);
    }
}
