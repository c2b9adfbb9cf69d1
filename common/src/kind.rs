//! Macros for defining text-backed kind enums.

/// Macro for defining a kind enum stored and transmitted as text.
///
/// Every variant is bound to its canonical textual value, which is used for
/// [`Display`], [`FromStr`] and (with the `postgres` feature of the calling
/// crate) `TEXT` column mapping. The calling crate must depend on [`strum`].
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube."]
///         #[value = "cube"]
///         Cube,
///
///         #[doc = "A sphere."]
///         #[value = "sphere"]
///         Sphere,
///     }
/// }
///
/// assert_eq!(Kind::Cube.as_str(), "cube");
/// assert_eq!("sphere".parse::<Kind>(), Ok(Kind::Sphere));
/// assert!("cone".parse::<Kind>().is_err());
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                #[value = $value:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            $crate::private::strum::IntoStaticStr,
            Ord,
            PartialEq,
            PartialOrd,
            $crate::private::strum::VariantArray,
        )]
        #[doc = $doc]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                #[strum(serialize = $value)]
                $variant,
            )*
        }

        impl $name {
            /// All the variants in their declaration order.
            pub const ALL: &'static [Self] =
                <Self as $crate::private::strum::VariantArray>::VARIANTS;

            /// Returns the canonical textual value of this kind.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                self.into()
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> Result<
                $name,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                <&str as $crate::private::postgres_types::FromSql<'a>>
                    ::from_sql(ty, raw)?
                    .parse::<$name>()
                    .map_err(::core::convert::Into::into)
            }

            fn accepts(ty: &$crate::private::postgres_types::Type) -> bool {
                <&str as $crate::private::postgres_types::FromSql<'a>>
                    ::accepts(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                <&str as $crate::private::postgres_types::ToSql>::to_sql(
                    &self.as_str(),
                    ty,
                    w,
                )
            }

            fn accepts(ty: &$crate::private::postgres_types::Type) -> bool {
                <&str as $crate::private::postgres_types::ToSql>::accepts(ty)
            }
        }
    };
}

#[cfg(test)]
mod spec {
    crate::define_kind! {
        #[doc = "Test kind."]
        enum Order {
            #[doc = "Ascending."]
            #[value = "price-asc"]
            Asc,

            #[doc = "Descending."]
            #[value = "price-desc"]
            Desc,
        }
    }

    #[test]
    fn uses_bound_values() {
        assert_eq!(Order::Asc.as_str(), "price-asc");
        assert_eq!(Order::Desc.to_string(), "price-desc");
        assert_eq!("price-desc".parse::<Order>(), Ok(Order::Desc));
        assert!("Desc".parse::<Order>().is_err());
        assert!("price-ASC".parse::<Order>().is_err());
    }

    #[test]
    fn lists_variants_in_order() {
        assert_eq!(Order::ALL, &[Order::Asc, Order::Desc]);
    }
}
