use std::error::Error;

/// Boxed static error type
pub type Err = Box<dyn Error + 'static>;

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: regex::Regex = regex::Regex::new($pattern).unwrap();
    }
  };
}

/// Splits a line into whitespace-separated tokens, owning them.
///
/// ```
/// assert_eq!(
///   rnng_oracle::utils::tokens("  John \t loves Mary "),
///   vec!["John".to_string(), "loves".to_string(), "Mary".to_string()],
/// );
/// ```
pub fn tokens(line: &str) -> Vec<String> {
  line.split_whitespace().map(str::to_string).collect()
}
