//! Render routines, one per page kind.
//!
//! Each routine takes a fetched document and mutates only the page regions
//! it owns, replacing them wholesale; rendering the same document twice
//! yields the same page. A routine may return a [`FollowUp`] when the page
//! is completed by a second fetch (the user page chains into the user's
//! collection listing).
//!
//! Listing routines set the listing's empty message exactly when the
//! document's `items` array is empty.

use crate::error::Result;
use crate::protocol::rel;
use crate::render::ResourceKind;
use crate::types::{Control, Document};
use crate::view::{Field, Form, Link, Listing, Page, Row};

/// A chained fetch requested by a render routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    /// Href to fetch next.
    pub href: String,
    /// Renderer for the fetched document.
    pub kind: ResourceKind,
}

/// Render a document with the routine for the given page kind.
pub fn render(kind: ResourceKind, doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    tracing::debug!(?kind, "rendering page");
    match kind {
        ResourceKind::Start => start_page(doc, page),
        ResourceKind::UserList => user_list(doc, page),
        ResourceKind::User => user(doc, page),
        ResourceKind::CollectionList => collection_list(doc, page),
        ResourceKind::Collection => collection(doc, page),
        ResourceKind::Recipe => recipe(doc, page),
        ResourceKind::CategoryList => category_list(doc, page),
        ResourceKind::Category => category(doc, page),
        ResourceKind::EthnicityList => ethnicity_list(doc, page),
        ResourceKind::Ethnicity => ethnicity(doc, page),
    }
}

/// Build the listing row for one item of the given detail kind.
///
/// Shared between the listing routines and the created-resource append path,
/// so a freshly created item gets exactly the row its listing would have
/// given it.
pub fn listing_row(kind: ResourceKind, item: &Document) -> Row {
    let cells = match kind {
        ResourceKind::User => vec![
            item.string_field("name").unwrap_or_default(),
            item.string_field("userName").unwrap_or_default(),
        ],
        ResourceKind::Collection => vec![item.string_field("name").unwrap_or_default()],
        ResourceKind::Recipe => vec![
            item.string_field("title").unwrap_or_default(),
            item.string_field("description").unwrap_or_default(),
        ],
        _ => vec![
            item.string_field("name").unwrap_or_default(),
            item.string_field("description").unwrap_or_default(),
        ],
    };
    let key = item.self_href().unwrap_or_default().to_string();
    let link = item
        .control(rel::SELF)
        .map(|c| Link::new("show", c.href.clone(), kind));
    Row {
        key,
        cells,
        link,
        delete: item.control(rel::DELETE).cloned(),
    }
}

/// Fill a listing from the document's items, or set the empty message.
fn fill_listing(
    doc: &Document,
    mut listing: Listing,
    kind: ResourceKind,
    empty_message: &str,
) -> Listing {
    if doc.items().is_empty() {
        listing.empty_message = Some(empty_message.to_string());
    } else {
        for item in doc.items() {
            listing.push_row(listing_row(kind, item));
        }
    }
    listing
}

fn nav_link(doc: &Document, relation: &str, label: &str) -> Option<Link> {
    let target = crate::render::kind_for_relation(relation)?;
    doc.control(relation)
        .map(|c| Link::new(label, c.href.clone(), target))
}

/// Start page: welcome text, the username lookup form, and a link into user
/// creation.
fn start_page(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    let all_users = doc.require_control(rel::ALL_USERS)?;

    page.navigation.clear();
    page.navigation.push(Link::new(
        "Create a new user",
        all_users.href.clone(),
        ResourceKind::UserList,
    ));
    if let Some(link) = nav_link(doc, rel::ALL_CATEGORIES, "All categories") {
        page.navigation.push(link);
    }
    if let Some(link) = nav_link(doc, rel::ALL_ETHNICITIES, "All ethnicities") {
        page.navigation.push(link);
    }

    page.title = "Welcome".to_string();
    page.content = vec!["Enter your username, or create a new user.".to_string()];
    page.listing = None;

    // Lookup form; the session turns the entered username into the user URL.
    let mut form = Form::new(all_users.href.clone(), "GET");
    form.add_field(Field::text("userName", "Enter username").required());
    page.form = Some(form);

    Ok(None)
}

/// All-users page: the registered users and the create-user form.
fn user_list(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    page.navigation = vec![Link::new("Back", "", ResourceKind::Start)];
    page.title = "Create a new user".to_string();
    page.content.clear();

    page.listing = Some(fill_listing(
        doc,
        Listing::with_columns(["Name", "Username", "Actions"]),
        ResourceKind::User,
        "No users registered yet.",
    ));

    page.form = Some(Form::from_control(doc.require_control(rel::ADD_USER)?)?);
    Ok(None)
}

/// User detail page; completed by the user's collection listing.
fn user(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    page.navigation = vec![Link::new("Back", "", ResourceKind::Start)];
    page.title = doc.string_field("name").unwrap_or_default();
    page.content = vec!["Below are your collections:".to_string()];

    let collections = doc.require_control(rel::COLLECTIONS_BY)?;
    Ok(Some(FollowUp {
        href: collections.href.clone(),
        kind: ResourceKind::CollectionList,
    }))
}

/// Collection listing: owns the result table and the add-collection form,
/// leaving title and content to the user page that chained here.
fn collection_list(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    page.listing = Some(fill_listing(
        doc,
        Listing::with_columns(["Collection Name", "Actions"]),
        ResourceKind::Collection,
        "You have no collections yet, create one.",
    ));

    page.form = match doc.control(rel::ADD_COLLECTION) {
        Some(control) => Some(Form::from_control(control)?),
        None => None,
    };
    Ok(None)
}

/// Collection page: its recipes and the add-recipe form.
fn collection(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    page.navigation.clear();
    if let Some(link) = nav_link(doc, rel::COLLECTIONS_BY, "Back to collections") {
        page.navigation.push(link);
    }
    page.title = "Recipes in this collection".to_string();
    page.content.clear();

    page.listing = Some(fill_listing(
        doc,
        Listing::with_columns(["Title", "Description", "Actions"]),
        ResourceKind::Recipe,
        "This collection has no recipes yet, add one.",
    ));

    page.form = match doc.control(rel::ADD_RECIPE) {
        Some(control) => Some(Form::from_control(control)?),
        None => None,
    };
    Ok(None)
}

/// Recipe detail page with its pre-filled edit form.
fn recipe(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    page.navigation.clear();
    if let Some(link) = nav_link(doc, rel::COLLECTION, "Back to collection") {
        page.navigation.push(link);
    }

    page.title = doc.string_field("title").unwrap_or_default();
    page.content = detail_paragraphs(
        doc,
        &[
            ("Description", "description"),
            ("Ingredients", "ingredients"),
            ("Rating", "rating"),
            ("Category", "category"),
            ("Ethnicity", "ethnicity"),
        ],
    );
    page.listing = None;

    page.form = edit_form(doc, ResourceKind::Recipe)?;
    Ok(None)
}

/// All-categories page with the create form.
fn category_list(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    named_list(
        doc,
        page,
        "Categories",
        ResourceKind::Category,
        "No categories yet, add one.",
        rel::ADD_CATEGORY,
    )
}

/// Category detail page with its pre-filled edit form.
fn category(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    named_detail(doc, page, ResourceKind::Category, rel::ALL_CATEGORIES, "All categories")
}

/// All-ethnicities page with the create form.
fn ethnicity_list(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    named_list(
        doc,
        page,
        "Ethnicities",
        ResourceKind::Ethnicity,
        "No ethnicities yet, add one.",
        rel::ADD_ETHNICITY,
    )
}

/// Ethnicity detail page with its pre-filled edit form.
fn ethnicity(doc: &Document, page: &mut Page) -> Result<Option<FollowUp>> {
    named_detail(doc, page, ResourceKind::Ethnicity, rel::ALL_ETHNICITIES, "All ethnicities")
}

/// Shared routine for the category and ethnicity listings; both are
/// name/description resources with the same page shape.
fn named_list(
    doc: &Document,
    page: &mut Page,
    title: &str,
    item: ResourceKind,
    empty_message: &str,
    add_relation: &str,
) -> Result<Option<FollowUp>> {
    page.navigation = vec![Link::new("Back", "", ResourceKind::Start)];
    page.title = title.to_string();
    page.content.clear();

    page.listing = Some(fill_listing(
        doc,
        Listing::with_columns(["Name", "Description", "Actions"]),
        item,
        empty_message,
    ));

    page.form = match doc.control(add_relation) {
        Some(control) => Some(Form::from_control(control)?),
        None => None,
    };
    Ok(None)
}

/// Shared routine for the category and ethnicity detail pages.
fn named_detail(
    doc: &Document,
    page: &mut Page,
    kind: ResourceKind,
    back_relation: &str,
    back_label: &str,
) -> Result<Option<FollowUp>> {
    page.navigation.clear();
    if let Some(link) = nav_link(doc, back_relation, back_label) {
        page.navigation.push(link);
    }
    page.title = doc.string_field("name").unwrap_or_default();
    page.content = detail_paragraphs(doc, &[("Description", "description")]);
    page.listing = None;

    page.form = edit_form(doc, kind)?;
    Ok(None)
}

fn detail_paragraphs(doc: &Document, fields: &[(&str, &str)]) -> Vec<String> {
    fields
        .iter()
        .filter_map(|(label, name)| {
            doc.string_field(name)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}: {}", label, v))
        })
        .collect()
}

/// Pre-filled edit form from the document's `edit` control, when present.
fn edit_form(doc: &Document, kind: ResourceKind) -> Result<Option<Form>> {
    match doc.control(rel::EDIT) {
        Some(control) => {
            let mut form = Form::from_control(control)?;
            form.prefill(doc, crate::render::editable_fields(kind));
            Ok(Some(form))
        }
        None => Ok(None),
    }
}
