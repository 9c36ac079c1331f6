use crate::error::ConstructionError;

///
/// Number
///
/// Untyped numeric input for the data-construction API. Keeps integer and
/// float inputs apart so narrowing conversions can report a type mismatch
/// separately from an out-of-range integer.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub(crate) const fn to_f32(self) -> f32 {
        match self {
            Self::Int(v) => v as f32,
            Self::Float(v) => v as f32,
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub(crate) const fn to_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// Narrow to an integer width, rejecting floats and out-of-range values.
    pub(crate) fn to_int<T>(
        self,
        argument: &str,
        target: &'static str,
    ) -> Result<T, ConstructionError>
    where
        T: TryFrom<i64>,
    {
        match self {
            Self::Int(v) => {
                T::try_from(v).map_err(|_| ConstructionError::range(argument, v, target))
            }
            Self::Float(_) => Err(ConstructionError::type_coercion(argument, target, "float")),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}
