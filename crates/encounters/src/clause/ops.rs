//! Closed operator enumerations and their SQL spellings.

/// Comparison operator for [`Compare`](super::Compare).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `=`
    Equal,
    /// `>`
    Greater,
    /// `<`
    Lesser,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LesserEqual,
}

impl Comparator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::Greater => ">",
            Comparator::Lesser => "<",
            Comparator::GreaterEqual => ">=",
            Comparator::LesserEqual => "<=",
        }
    }
}

/// How the children of a WHERE or conditions group are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    /// Join token, including the surrounding spaces.
    pub fn as_sql(self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }
}

/// Sort direction for [`Order`](super::Order).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ordering {
    #[default]
    Ascending,
    Descending,
}

impl Ordering {
    pub fn as_sql(self) -> &'static str {
        match self {
            Ordering::Ascending => "ASC",
            Ordering::Descending => "DESC",
        }
    }
}
