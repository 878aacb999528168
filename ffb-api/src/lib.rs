mod dialog;
mod error;
mod game;
mod model_change;
mod report;
mod ws;

pub use dialog::*;
pub use error::*;
pub use game::*;
pub use model_change::*;
pub use report::*;
pub use ws::*;

use std::{fmt::Debug, hash::Hash};

macro_rules! derive_api_data {
    () => {};
    ($item:item $($rest:item)*) => {
        #[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
        $item

        derive_api_data!($($rest)*);
    };
}
pub(crate) use derive_api_data;

pub trait ApiData:
    serde::Serialize + serde::de::DeserializeOwned + std::fmt::Debug + Clone
{
}
impl<T> ApiData for T where
    T: serde::Serialize + serde::de::DeserializeOwned + std::fmt::Debug + Clone
{
}

/// A tagged union of payloads whose variants can be told apart by a cheap kind tag.
pub trait Message: ApiData {
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

/// One variant payload of a [`Message`].
pub trait Payload<M: Message>: Sized + 'static {
    const KIND: M::Kind;

    fn extract(message: &M) -> Option<&Self>;
}

/// Implements [`Payload`] for every listed type. Each type must be wrapped by
/// a variant of the same name, and the kind enum must have a variant of that
/// name too.
macro_rules! impl_payloads {
    ($message:ident => $kind:ident { $($payload:ident),* $(,)? }) => {
        impl $crate::Message for $message {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                $kind::from(self)
            }
        }

        $(
            impl $crate::Payload<$message> for $payload {
                const KIND: $kind = $kind::$payload;

                fn extract(message: &$message) -> Option<&Self> {
                    match message {
                        $message::$payload(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for $message {
                fn from(payload: $payload) -> Self {
                    $message::$payload(payload)
                }
            }
        )*
    };
}
pub(crate) use impl_payloads;
