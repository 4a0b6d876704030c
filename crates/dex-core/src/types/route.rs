//! Logical views of the application.

use std::fmt;

use super::PokemonId;

/// A logical view.
///
/// The detail view remembers which view it was opened from; that origin only
/// decides where "back" leads.
///
/// # Examples
///
/// ```
/// use dex_core::Route;
///
/// let detail = Route::detail(25, Route::Favorites);
/// assert_eq!(detail.back(), Route::Favorites);
/// assert_eq!(Route::List.back(), Route::Home);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Landing page.
    #[default]
    Home,
    /// Full catalog list (search results).
    List,
    /// A single entry.
    Detail {
        /// Entry being shown.
        id: PokemonId,
        /// View the detail was opened from.
        from: Box<Route>,
    },
    /// Favorited entries.
    Favorites,
    /// Unknown entry or view.
    NotFound,
}

impl Route {
    /// Creates a detail route reached from `from`.
    ///
    /// Nested detail origins are collapsed to the outermost non-detail view,
    /// so following evolution links never builds a chain of back targets.
    pub fn detail(id: PokemonId, from: Self) -> Self {
        let from = match from {
            Self::Detail { from, .. } => from,
            other => Box::new(other),
        };
        Self::Detail { id, from }
    }

    /// Where "back" leads from this view.
    #[must_use]
    pub fn back(&self) -> Self {
        match self {
            Self::Detail { from, .. } => (**from).clone(),
            _ => Self::Home,
        }
    }

    /// Short title used in headers.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::List => "Pokédex",
            Self::Detail { .. } => "Detail",
            Self::Favorites => "Favorites",
            Self::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detail { id, .. } => write!(f, "Detail #{id}"),
            other => f.write_str(other.title()),
        }
    }
}
