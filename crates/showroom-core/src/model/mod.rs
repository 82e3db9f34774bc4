// ── Domain model ──
//
// One module per managed entity. Each entity has a companion `*Draft`
// (fields minus id and backend timestamps) used as create/update body
// and as form state.

/// Declares an enum over a free-text datastore column. Known labels map
/// to unit variants; any other label is kept verbatim in `Other`, so one
/// unexpected row never fails a whole list.
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Label written by another client, kept as stored.
            Other(String),
        }

        impl $name {
            /// Label as stored in the datastore.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Other(label) => label.as_str(),
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(label: &str) -> Result<Self, Self::Err> {
                Ok(match label {
                    $( $label => Self::$variant, )+
                    other => Self::Other(other.to_owned()),
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let label = <String as ::serde::Deserialize>::deserialize(d)?;
                match label.parse() {
                    Ok(value) => Ok(value),
                    Err(never) => match never {},
                }
            }
        }
    };
}

pub mod appointment;
pub mod article;
pub mod delivery;
pub mod entity_id;
pub mod photo;
pub mod reservation;
pub mod vehicle;

pub(crate) mod clock;

pub use appointment::{Appointment, AppointmentDraft, AppointmentStatus, AppointmentType};
pub use article::{Article, ArticleDraft, ArticleStatus};
pub use delivery::{Delivery, DeliveryDraft, DeliveryStatus};
pub use entity_id::{EntityId, InvalidEntityId};
pub use photo::{Photo, PhotoDraft};
pub use reservation::{Reservation, ReservationDraft, ReservationStatus};
pub use vehicle::{Vehicle, VehicleCategory, VehicleDraft};

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

/// A required text field must hold something besides whitespace.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::MissingField { field })
    } else {
        Ok(())
    }
}

/// A required field that has no "blank" value of its own (dates, times).
pub(crate) fn require_some<T>(field: &'static str, value: Option<&T>) -> Result<(), CoreError> {
    value.map(|_| ()).ok_or(CoreError::MissingField { field })
}

/// Treat an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
