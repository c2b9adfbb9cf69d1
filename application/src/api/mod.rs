//! GraphQL API definitions.

pub mod development;
pub mod lead;
pub mod listing;
mod mutation;
pub mod property;
mod query;
pub mod scalar;
pub mod search;

use crate::{define_error, Context};

pub use self::{
    development::Development, mutation::Mutation, property::Property,
    query::Query,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    Mutation,
    juniper::EmptySubscription<Context>,
>;

/// Defines a GraphQL enum mirroring a domain kind enum variant by variant.
#[macro_export]
macro_rules! mirror_enum {
    (
        #[doc = $doc:literal]
        #[graphql(name = $gql:literal)]
        enum $name:ident = $($domain:ident)::+ {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Eq,
            ::juniper::GraphQLEnum,
            PartialEq,
        )]
        #[doc = $doc]
        #[graphql(name = $gql)]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                $variant,
            )*
        }

        impl From<$($domain)::+> for $name {
            fn from(v: $($domain)::+) -> Self {
                type Domain = $($domain)::+;
                match v {
                    $(
                        Domain::$variant => Self::$variant,
                    )*
                }
            }
        }

        impl From<$name> for $($domain)::+ {
            fn from(v: $name) -> Self {
                match v {
                    $(
                        $name::$variant => Self::$variant,
                    )*
                }
            }
        }
    };
}

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated user must be an administrator"]
        Admin,
    }
}
