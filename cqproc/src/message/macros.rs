//! Declaration macros for message types.
//!
//! A message type is declared exactly once; the macro wires up the runtime
//! contract ([`Message`](crate::message::Message)), the static contract
//! ([`Contract`](crate::message::Contract)), and the parameter/output
//! plumbing the registry needs to accept actor functions consuming or
//! producing the type.

/// Implement the message traits for one concrete type.
///
/// Not part of the public surface; use [`messages!`](crate::messages).
#[doc(hidden)]
#[macro_export]
macro_rules! __declare_message {
    ($ty:ty, $category:expr) => {
        impl $crate::message::Message for $ty {
            fn category(&self) -> $crate::message::Category {
                $category
            }

            fn key(&self) -> $crate::util::TypeKey {
                $crate::util::TypeKey::of::<$ty>()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::message::Contract for $ty {
            const CATEGORY: $crate::message::Category = $category;
        }

        impl $crate::registry::ActorParam for $ty {
            fn spec() -> $crate::registry::ParamSpec {
                $crate::registry::ParamSpec::message::<$ty>()
            }

            fn extract(
                args: &$crate::registry::ActorArgs<'_>,
            ) -> ::std::result::Result<Self, $crate::dispatch::DispatchError> {
                args.message::<$ty>()
            }
        }

        impl $crate::registry::ActorOutput for $ty {
            fn spec() -> $crate::registry::OutputSpec {
                $crate::registry::OutputSpec::of::<$ty>()
            }

            fn into_messages(self) -> $crate::message::MessageBatch {
                ::std::vec![::std::sync::Arc::new(self) as $crate::message::AnyMessage]
            }
        }
    };
}

/// Declare the semantic category of message types.
///
/// One line per type, `<kind> <Type>;`, where kind is one of `command`,
/// `query`, `context`, `domain_event`, `read_event`, `write_event`,
/// `response_event`, `error`. The types themselves are ordinary structs or
/// enums deriving `Debug` and `Clone`.
///
/// # Example
/// ```rust,ignore
/// use cqproc::messages;
///
/// #[derive(Debug, Clone)]
/// struct CreateEmployee {
///     first_name: String,
///     last_name: String,
/// }
///
/// #[derive(Debug, Clone)]
/// struct EmployeeCreated {
///     first_name: String,
///     last_name: String,
/// }
///
/// messages! {
///     command CreateEmployee;
///     domain_event EmployeeCreated;
/// }
/// ```
#[macro_export]
macro_rules! messages {
    () => {};
    (command $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!($ty, $crate::message::Category::Command);
        impl $crate::message::Task for $ty {}
        $crate::messages!($($rest)*);
    };
    (query $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!($ty, $crate::message::Category::Query);
        impl $crate::message::Task for $ty {}
        $crate::messages!($($rest)*);
    };
    (context $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!($ty, $crate::message::Category::Context);
        $crate::messages!($($rest)*);
    };
    (domain_event $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!(
            $ty,
            $crate::message::Category::Event($crate::message::EventKind::BusinessDomain)
        );
        $crate::messages!($($rest)*);
    };
    (read_event $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!(
            $ty,
            $crate::message::Category::Event($crate::message::EventKind::Read)
        );
        $crate::messages!($($rest)*);
    };
    (write_event $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!(
            $ty,
            $crate::message::Category::Event($crate::message::EventKind::Write)
        );
        $crate::messages!($($rest)*);
    };
    (response_event $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!(
            $ty,
            $crate::message::Category::Event($crate::message::EventKind::Response)
        );
        $crate::messages!($($rest)*);
    };
    (error $ty:ty; $($rest:tt)*) => {
        $crate::__declare_message!($ty, $crate::message::Category::Error);
        $crate::messages!($($rest)*);
    };
}
