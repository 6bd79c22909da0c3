//! Domain aggregates and pure computations used by the service layer.

/// Implements string conversions for a fieldless enum stored as text.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::types::TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::domain::types::TypeConstraintError::InvalidValue(
                        other.to_string(),
                    )),
                }
            }
        }
    };
}

pub mod activity;
pub mod article;
pub mod chat;
pub mod customer;
pub mod dashboard;
pub mod deal;
pub mod drive_file;
pub mod lead;
pub mod pipeline;
pub mod pricing;
pub mod quiz;
pub mod quiz_result;
pub mod radar;
pub mod roi;
pub mod task;
pub mod types;
