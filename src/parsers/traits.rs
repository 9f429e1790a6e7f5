use crate::errors::WrappedResult;

pub trait Parser {
    type Output;

    fn parse(content: &str) -> WrappedResult<Vec<Self::Output>>;

    fn is_supported(filename: Option<&str>, content: &str) -> bool;
}
