//! `define_port_error!`: declares a port error enum with `thiserror`
//! messages and a snake_case constructor per variant.
//!
//! String fields take `impl Into<String>` so adapters can pass `&str` or
//! formatted messages directly.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        pub enum StoreError {
            Unreachable { message: String } => "store unreachable: {message}",
            Saturated { pending: u32 } => "store saturated with {pending} pending writes",
            Rejected { message: String, attempts: u32 } => "rejected: {message} after {attempts}",
            Duplicate => "duplicate row",
        }
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        assert_eq!(
            StoreError::unreachable("refused").to_string(),
            "store unreachable: refused"
        );
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            StoreError::saturated(3_u32),
            StoreError::Saturated { pending: 3 }
        );
    }

    #[rstest]
    fn mixed_and_unit_variants_get_constructors() {
        assert_eq!(
            StoreError::rejected("constraint", 2_u32).to_string(),
            "rejected: constraint after 2"
        );
        assert_eq!(StoreError::duplicate().to_string(), "duplicate row");
    }
}
