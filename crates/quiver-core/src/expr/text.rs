use crate::expr::{Boolish, Expr};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// TextMatch
///
/// Keyword match predicate. `field: None` targets the engine's default text
/// field; `all` requires every token to match instead of any.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TextMatch {
    pub token: String,
    pub field: Option<String>,
    pub weight: f32,
    pub all: bool,
}

impl TextMatch {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            field: None,
            weight: 1.0,
            all: false,
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub const fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    #[must_use]
    pub fn into_expr(self) -> Expr {
        Expr::Match(self)
    }
}

impl From<TextMatch> for Expr {
    fn from(m: TextMatch) -> Self {
        Self::Match(m)
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match(token={:?}, field=", self.token)?;
        match &self.field {
            Some(field) => write!(f, "{field:?}")?,
            None => f.write_str("None")?,
        }
        write!(f, ", weight={:?}, all={})", self.weight, self.all)
    }
}

impl<T: Into<Boolish>> BitOr<T> for TextMatch {
    type Output = Expr;

    fn bitor(self, rhs: T) -> Expr {
        self.into_expr().or(rhs)
    }
}

impl<T: Into<Boolish>> BitAnd<T> for TextMatch {
    type Output = Expr;

    fn bitand(self, rhs: T) -> Expr {
        self.into_expr().and(rhs)
    }
}

/// Start a keyword match on `token` with weight 1.0 against the default field.
#[must_use]
pub fn r#match(token: impl Into<String>) -> TextMatch {
    TextMatch::new(token)
}
