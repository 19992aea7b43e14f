/*++

Licensed under the Apache-2.0 license.

File Name:

    macros.rs

Abstract:

    Macros used by the project

--*/

/// Declares a field-less enum backed by fixed integer codes.
///
/// Generates `From<Enum>` for the backing type, `TryFrom<backing>` for the
/// enum (the unrecognized code is returned as the error) and a `Display`
/// impl that prints the variant name.
#[macro_export]
macro_rules! bus_enum {
    (
        $(#[$($enum_attrs:tt)*])*
        $vis:vis $enum_name:ident;
        $type:ty;
        {
            $(
                $(#[$($attrs:tt)*])*
                $name:ident = $value:literal,
            )*
        }
    ) => {
        $(#[$($enum_attrs)*])*
        $vis enum $enum_name {
            $(
                $(#[$($attrs)*])*
                $name = $value,
            )*
        }

        impl From<$enum_name> for $type {
            fn from(val: $enum_name) -> $type {
                match val {
                    $($enum_name::$name => $value,)*
                }
            }
        }

        impl TryFrom<$type> for $enum_name {
            type Error = $type;

            fn try_from(val: $type) -> Result<$enum_name, $type> {
                match val {
                    $($value => Ok($enum_name::$name),)*
                    _ => Err(val),
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match self {
                    $($enum_name::$name => write!(f, stringify!($name)),)*
                }
            }
        }
    };
}
