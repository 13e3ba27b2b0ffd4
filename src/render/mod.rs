//! Renderer dispatch: which routine handles which document.
//!
//! The original client wired the "next renderer" into every link at creation
//! time, as a captured callback. Here dispatch is a finite table keyed by
//! relation name: following a link means looking up the relation's
//! [`ResourceKind`] and rendering the fetched document with that kind's
//! routine. Embedded `self` links inside listings are the one place a
//! relation name is not enough; they resolve through [`item_kind`].
//!
//! The per-kind field tables ([`editable_fields`]) make the input-name to
//! attribute-name coupling explicit, and [`update_strategy`] decides what a
//! successful update does to the view.

pub(crate) mod pages;

pub use pages::{listing_row, render, FollowUp};

use crate::protocol::rel;

/// The page types the client can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// API entry point with the username lookup form.
    Start,
    /// All users; doubles as the create-user page.
    UserList,
    /// One user's detail page.
    User,
    /// Collections owned by a user.
    CollectionList,
    /// One collection: its recipes plus the add-recipe form.
    Collection,
    /// One recipe's detail page.
    Recipe,
    /// All categories.
    CategoryList,
    /// One category's detail page.
    Category,
    /// All ethnicities.
    EthnicityList,
    /// One ethnicity's detail page.
    Ethnicity,
}

impl ResourceKind {
    /// Whether this kind renders a result table.
    pub fn has_listing(self) -> bool {
        item_kind(self).is_some()
    }
}

/// What a successful update submit does to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Re-fetch the tracked reload URL and re-render.
    Refetch,
    /// Patch the visible fields directly from the submitted values.
    PatchFields,
}

/// Dispatch table from relation name to target page kind.
///
/// Returns `None` for relations that are not navigational (`edit`,
/// `profile`, the create controls) and for `self`, which depends on the
/// enclosing listing.
pub fn kind_for_relation(relation: &str) -> Option<ResourceKind> {
    match relation {
        rel::ALL_USERS => Some(ResourceKind::UserList),
        rel::COLLECTIONS_BY => Some(ResourceKind::CollectionList),
        rel::COLLECTION => Some(ResourceKind::Collection),
        rel::ALL_CATEGORIES => Some(ResourceKind::CategoryList),
        rel::CATEGORY => Some(ResourceKind::Category),
        rel::ALL_ETHNICITIES => Some(ResourceKind::EthnicityList),
        rel::ETHNICITY => Some(ResourceKind::Ethnicity),
        _ => None,
    }
}

/// The detail kind behind a listing's embedded `self` links.
pub fn item_kind(list: ResourceKind) -> Option<ResourceKind> {
    match list {
        ResourceKind::UserList => Some(ResourceKind::User),
        ResourceKind::CollectionList => Some(ResourceKind::Collection),
        ResourceKind::Collection => Some(ResourceKind::Recipe),
        ResourceKind::CategoryList => Some(ResourceKind::Category),
        ResourceKind::EthnicityList => Some(ResourceKind::Ethnicity),
        _ => None,
    }
}

/// Declared editable fields per resource type.
///
/// Drives edit-form pre-fill and direct field patching after an update;
/// input names equal document attribute names by this table, not by
/// accident.
pub fn editable_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::User => &["name", "userName"],
        ResourceKind::Collection => &["name", "description"],
        ResourceKind::Recipe => &[
            "title",
            "description",
            "ingredients",
            "rating",
            "ethnicity",
            "category",
        ],
        ResourceKind::Category | ResourceKind::Ethnicity => &["name", "description"],
        _ => &[],
    }
}

/// Update handling per resource type.
///
/// Titled-content detail pages patch their visible fields from the
/// submitted values; listing-backed pages re-fetch their reload URL. Never
/// both.
pub fn update_strategy(kind: ResourceKind) -> UpdateStrategy {
    match kind {
        ResourceKind::User
        | ResourceKind::Recipe
        | ResourceKind::Category
        | ResourceKind::Ethnicity => UpdateStrategy::PatchFields,
        _ => UpdateStrategy::Refetch,
    }
}
