//! Macros for declaring state ids.

/// Generate a small enum of state ids with explicit numeric values.
///
/// The enum converts into [`StateId`](crate::StateId), so it can be passed
/// anywhere the machine takes an id.
///
/// # Example
///
/// ```
/// use panelstack::{state_ids, StateId};
///
/// state_ids! {
///     pub enum Screen {
///         Title = 1,
///         Options = 2,
///         Credits = 3,
///     }
/// }
///
/// assert_eq!(StateId::from(Screen::Options), StateId::new(2));
/// assert_eq!(Screen::Credits.name(), "Credits");
/// assert_eq!(Screen::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub const fn id(self) -> $crate::StateId {
                match self {
                    $(Self::$variant => $crate::StateId::new($value)),+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl From<$name> for $crate::StateId {
            fn from(value: $name) -> Self {
                value.id()
            }
        }
    };
}
