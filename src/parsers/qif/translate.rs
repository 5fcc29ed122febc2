/// Human-readable names for field codes, keyed by the `Switch` directive.
pub type FieldTranslation = &'static [(char, &'static str)];

const BANK: FieldTranslation = &[
    ('D', "Date"),
    ('T', "Amount"),
    ('N', "Transaction Number"),
    ('P', "Payee"),
    ('M', "Memo"),
];

const CREDIT_CARD: FieldTranslation = BANK;

const INVESTMENT: FieldTranslation = &[
    ('D', "Date"),
    ('T', "Amount"),
    ('N', "Account Name"),
    ('S', "Security"),
    ('M', "Memo"),
];

pub fn translation_for(switch: &str) -> Option<FieldTranslation> {
    match switch {
        "!Type:Bank" => Some(BANK),
        "!Type:CCard" => Some(CREDIT_CARD),
        "!Type:Invst" => Some(INVESTMENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("!Type:Bank", 'N', Some("Transaction Number"))]
    #[case("!Type:CCard", 'P', Some("Payee"))]
    #[case("!Type:Invst", 'N', Some("Account Name"))]
    #[case("!Type:Invst", 'S', Some("Security"))]
    #[case("!Type:Invst", 'P', None)]
    #[case("!Type:Bank", 'S', None)]
    #[case("!Type:Bank", 'U', None)]
    fn test_translation_entries(#[case] switch: &str, #[case] code: char, #[case] expected: Option<&str>) {
        let table = translation_for(switch).unwrap();
        let alias = table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name);
        assert_eq!(alias, expected);
    }

    #[rstest]
    #[case("!Type:Cash")]
    #[case("!Account:Checking")]
    #[case("!Type:bank")]
    #[case("")]
    fn test_unknown_switch_has_no_table(#[case] switch: &str) {
        assert!(translation_for(switch).is_none());
    }
}
