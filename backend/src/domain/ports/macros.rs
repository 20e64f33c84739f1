//! Helper macro for declaring driven-port error enums.
//!
//! Each variant gets a snake_case constructor whose parameters accept
//! anything convertible into the field type, so adapters can write
//! `BookingRepositoryError::query("timeout")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),+ } )?,
            )+
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),+ } )?);
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleStoreError {
            Connection { message: String } => "store unreachable: {message}",
            Duplicate => "record already exists",
            Limit { message: String, limit: u32 } => "{message} (limit {limit})",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SampleStoreError::connection("refused");
        assert_eq!(err.to_string(), "store unreachable: refused");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SampleStoreError::duplicate(), SampleStoreError::Duplicate);
        assert_eq!(
            SampleStoreError::duplicate().to_string(),
            "record already exists"
        );
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SampleStoreError::limit("too many bookings", 3_u32);
        assert_eq!(err.to_string(), "too many bookings (limit 3)");
    }
}
