use crate::errors::QifResult;

pub trait Parser {
    type Output;

    fn parse(&self, content: &str) -> QifResult<Vec<Self::Output>>;

    fn is_supported(filename: Option<&str>, content: &str) -> bool;
}
