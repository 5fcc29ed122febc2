use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_ACCOUNT: &str = "Unnamed Account";
pub const DEFAULT_TYPE: &str = "Unset Type";

const RECORD_DELIMITER: char = '^';
const DIRECTIVE_PREFIX: char = '!';

/// A `!`-prefixed control line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Account(String),
    Type(String),
    AutoSwitch,
    Unrecognized(String),
}

impl From<&str> for Directive {
    fn from(line: &str) -> Self {
        if let Some(name) = line.strip_prefix("!Account:") {
            Directive::Account(name.trim().to_string())
        } else if let Some(name) = line.strip_prefix("!Type:") {
            Directive::Type(name.trim().to_string())
        } else if line == "!Option:AutoSwitch" {
            Directive::AutoSwitch
        } else {
            Directive::Unrecognized(line.to_string())
        }
    }
}

/// Directive context attached to every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveContext {
    /// Raw text of the most recent directive line, of any kind.
    pub switch: Option<String>,
    pub account: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Mutable directive state for a single parse invocation.
///
/// Last directive wins; there is no nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState {
    pub current_account: String,
    pub current_type: String,
    pub current_switch: Option<String>,
    /// Set by `!Option:AutoSwitch`. Account auto-switching is not implemented,
    /// so nothing reads this beyond reporting it.
    pub auto_switch: bool,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            current_account: DEFAULT_ACCOUNT.to_string(),
            current_type: DEFAULT_TYPE.to_string(),
            current_switch: None,
            auto_switch: false,
        }
    }
}

impl ParserState {
    pub fn apply(&mut self, line: &str) {
        self.current_switch = Some(line.to_string());

        match Directive::from(line) {
            Directive::Account(name) => {
                info!(account = %name, "switched account");
                self.current_account = name;
            }
            Directive::Type(name) => {
                info!(kind = %name, "switched type");
                self.current_type = name;
            }
            Directive::AutoSwitch => {
                info!("enabled account auto-switching");
                self.auto_switch = true;
            }
            Directive::Unrecognized(line) => {
                warn!(directive = %line, "unrecognized directive");
            }
        }
    }

    pub fn context(&self) -> DirectiveContext {
        DirectiveContext {
            switch: self.current_switch.clone(),
            account: self.current_account.clone(),
            kind: self.current_type.clone(),
        }
    }
}

/// Field values of one record keyed by their single-character code.
///
/// Codes are unique; inserting an existing code replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields(Vec<(char, String)>);

impl RecordFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: char, value: String) {
        match self.0.iter_mut().find(|(existing, _)| *existing == code) {
            Some(slot) => slot.1 = value,
            None => self.0.push((code, value)),
        }
    }

    pub fn get(&self, code: char) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == code)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, code: char) -> bool {
        self.get(code).is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|(code, _)| *code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.0.iter().map(|(code, value)| (*code, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(char, String)> for RecordFields {
    fn from_iter<I: IntoIterator<Item = (char, String)>>(iter: I) -> Self {
        let mut fields = RecordFields::new();
        for (code, value) in iter {
            fields.insert(code, value);
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub fields: RecordFields,
    pub context: DirectiveContext,
}

/// Splits QIF text into records, one per non-empty `^`-delimited chunk.
pub fn tokenize(content: &str) -> Vec<RawRecord> {
    let mut state = ParserState::default();
    tokenize_with_state(content, &mut state)
}

pub fn tokenize_with_state(content: &str, state: &mut ParserState) -> Vec<RawRecord> {
    content
        .trim()
        .split(RECORD_DELIMITER)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| read_chunk(chunk, state))
        .collect()
}

fn read_chunk(chunk: &str, state: &mut ParserState) -> RawRecord {
    let mut fields = RecordFields::new();

    for line in chunk.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with(DIRECTIVE_PREFIX) {
            state.apply(line);
            continue;
        }

        let mut chars = line.chars();
        if let Some(code) = chars.next() {
            fields.insert(code, chars.as_str().trim().to_string());
        }
    }

    RawRecord {
        fields,
        context: state.context(),
    }
}
