//! Named builder methods. These are the canonical construction surface; the
//! infix operators in `ops` delegate here.

use crate::expr::{
    BinaryOp, Boolish, Expr, Flexible, Iterable, Numeric, Ordered, Stringy, StringyList,
    TernaryOp, UnaryOp, literal,
};

impl Expr {
    fn with(self, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        Self::binary(self, op, rhs.into())
    }

    // ------------------------------------------------------------------
    // Unary
    // ------------------------------------------------------------------

    #[must_use]
    #[expect(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    #[must_use]
    pub fn is_null(self) -> Self {
        Self::unary(UnaryOp::IsNull, self)
    }

    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::unary(UnaryOp::IsNotNull, self)
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self::unary(UnaryOp::Abs, self)
    }

    #[must_use]
    pub fn ln(self) -> Self {
        Self::unary(UnaryOp::Ln, self)
    }

    #[must_use]
    pub fn exp(self) -> Self {
        Self::unary(UnaryOp::Exp, self)
    }

    #[must_use]
    pub fn sqrt(self) -> Self {
        Self::unary(UnaryOp::Sqrt, self)
    }

    #[must_use]
    pub fn square(self) -> Self {
        Self::unary(UnaryOp::Square, self)
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    #[must_use]
    pub fn eq(self, other: impl Into<Flexible>) -> Self {
        self.with(BinaryOp::Eq, other.into())
    }

    #[must_use]
    pub fn ne(self, other: impl Into<Flexible>) -> Self {
        self.with(BinaryOp::NotEq, other.into())
    }

    #[must_use]
    pub fn lt(self, other: impl Into<Ordered>) -> Self {
        self.with(BinaryOp::Lt, other.into())
    }

    #[must_use]
    pub fn lte(self, other: impl Into<Ordered>) -> Self {
        self.with(BinaryOp::LtEq, other.into())
    }

    #[must_use]
    pub fn gt(self, other: impl Into<Ordered>) -> Self {
        self.with(BinaryOp::Gt, other.into())
    }

    #[must_use]
    pub fn gte(self, other: impl Into<Ordered>) -> Self {
        self.with(BinaryOp::GtEq, other.into())
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    #[must_use]
    pub fn add(self, other: impl Into<Numeric>) -> Self {
        self.with(BinaryOp::Add, other.into())
    }

    #[must_use]
    pub fn sub(self, other: impl Into<Numeric>) -> Self {
        self.with(BinaryOp::Sub, other.into())
    }

    #[must_use]
    pub fn mul(self, other: impl Into<Numeric>) -> Self {
        self.with(BinaryOp::Mul, other.into())
    }

    #[must_use]
    pub fn div(self, other: impl Into<Numeric>) -> Self {
        self.with(BinaryOp::Div, other.into())
    }

    #[must_use]
    pub fn pow(self, exponent: impl Into<Numeric>) -> Self {
        self.with(BinaryOp::Pow, exponent.into())
    }

    #[must_use]
    pub fn min(self, other: impl Into<Ordered>) -> Self {
        self.with(BinaryOp::Min, other.into())
    }

    #[must_use]
    pub fn max(self, other: impl Into<Ordered>) -> Self {
        self.with(BinaryOp::Max, other.into())
    }

    // ------------------------------------------------------------------
    // Logical
    // ------------------------------------------------------------------

    #[must_use]
    pub fn and(self, other: impl Into<Boolish>) -> Self {
        self.with(BinaryOp::And, other.into())
    }

    #[must_use]
    pub fn or(self, other: impl Into<Boolish>) -> Self {
        self.with(BinaryOp::Or, other.into())
    }

    // ------------------------------------------------------------------
    // String and list
    // ------------------------------------------------------------------

    #[must_use]
    pub fn starts_with(self, prefix: impl Into<Stringy>) -> Self {
        self.with(BinaryOp::StartsWith, prefix.into())
    }

    /// Substring test on strings, membership test on lists.
    #[must_use]
    pub fn contains(self, item: impl Into<Flexible>) -> Self {
        self.with(BinaryOp::Contains, item.into())
    }

    #[must_use]
    pub fn in_(self, collection: impl Into<Iterable>) -> Self {
        self.with(BinaryOp::In, collection.into())
    }

    #[must_use]
    pub fn match_all(self, tokens: impl Into<StringyList>) -> Self {
        self.with(BinaryOp::MatchAll, tokens.into())
    }

    #[must_use]
    pub fn match_any(self, tokens: impl Into<StringyList>) -> Self {
        self.with(BinaryOp::MatchAny, tokens.into())
    }

    /// Regular-expression match. Absent flags are encoded as a null literal.
    #[must_use]
    pub fn regexp_match(self, pattern: impl Into<String>, flags: Option<&str>) -> Self {
        Self::ternary(
            TernaryOp::RegexpMatch,
            self,
            literal(pattern.into()),
            literal(flags),
        )
    }

    // ------------------------------------------------------------------
    // Null handling and selection
    // ------------------------------------------------------------------

    /// Substitute `default` when the value is null or the field is absent.
    #[must_use]
    pub fn coalesce(self, default: impl Into<Numeric>) -> Self {
        self.with(BinaryOp::Coalesce, default.into())
    }

    /// `if self { x } else { y }`.
    #[must_use]
    pub fn choose(self, x: impl Into<Flexible>, y: impl Into<Flexible>) -> Self {
        Self::ternary(
            TernaryOp::Choose,
            self,
            x.into().into_expr(),
            y.into().into_expr(),
        )
    }

    /// Multiply by `factor` where `condition` holds; shorthand for
    /// `self * condition.choose(factor, 1.0)`.
    #[must_use]
    pub fn boost(self, condition: impl Into<Boolish>, factor: impl Into<Numeric>) -> Self {
        let scale = condition
            .into()
            .into_expr()
            .choose(factor.into().into_expr(), 1.0);

        self.mul(scale)
    }
}
