//! End-to-end render/submit cycle tests against a mock Foodpoint server.
//!
//! Response bodies mirror what the real API serves: Mason documents with
//! `@controls`, `items` listings, 201 + `Location` on create, 204 on
//! update/delete, and `@error/@message` bodies on failure.

use foodpoint_client::{ApiClient, ClientConfig, Notification, ResourceKind, Session};
use mockito::Matcher;
use serde_json::json;

fn collection_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"description": "Name of collection", "type": "string"},
            "description": {"description": "Description for collection", "type": "string"}
        },
        "required": ["name"]
    })
}

fn category_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"description": "Name of category", "type": "string"},
            "description": {"description": "Description for category", "type": "string"}
        },
        "required": ["name"]
    })
}

async fn session_for(server: &mockito::ServerGuard) -> Session {
    let config = ClientConfig::new(format!("{}/api/", server.url()));
    Session::new(ApiClient::new(config).unwrap())
}

#[tokio::test]
async fn empty_collection_shows_the_empty_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/alice/collections/soups/")
        .with_status(200)
        .with_body(
            json!({
                "items": [],
                "@controls": {
                    "self": {"href": "/api/users/alice/collections/soups/"}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session
        .open("/api/users/alice/collections/soups/", ResourceKind::Collection)
        .await;

    let listing = session.view().page.listing.as_ref().unwrap();
    assert!(listing.rows.is_empty());
    assert_eq!(
        listing.empty_message.as_deref(),
        Some("This collection has no recipes yet, add one.")
    );
}

#[tokio::test]
async fn user_page_chains_into_its_collection_listing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/alice/")
        .with_status(200)
        .with_body(
            json!({
                "name": "Alice",
                "userName": "alice",
                "@controls": {
                    "self": {"href": "/api/users/alice/"},
                    "fpoint:collections-by": {"href": "/api/users/alice/collections/"}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/users/alice/collections/")
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    {"name": "soups", "description": "", "@controls": {"self": {"href": "/api/users/alice/collections/soups/"}}}
                ],
                "@controls": {
                    "self": {"href": "/api/users/alice/collections/"},
                    "fpoint:add-collection": {
                        "href": "/api/users/alice/collections/",
                        "method": "POST",
                        "encoding": "json",
                        "schema": collection_schema()
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session.open("/api/users/alice/", ResourceKind::User).await;

    assert_eq!(session.view().page.title, "Alice");
    let listing = session.view().page.listing.as_ref().unwrap();
    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].cells[0], "soups");
    assert_eq!(
        session.context().reload_url.as_deref(),
        Some("/api/users/alice/collections/")
    );
    assert_eq!(session.context().reload_kind, Some(ResourceKind::CollectionList));
}

#[tokio::test]
async fn create_fetches_the_location_and_appends_one_row() {
    let mut server = mockito::Server::new_async().await;
    // The listing must be fetched exactly once: appending after a create
    // never re-renders the parent.
    let list = server
        .mock("GET", "/api/users/alice/collections/")
        .with_status(200)
        .with_body(
            json!({
                "items": [],
                "@controls": {
                    "self": {"href": "/api/users/alice/collections/"},
                    "fpoint:add-collection": {
                        "href": "/api/users/alice/collections/",
                        "method": "POST",
                        "encoding": "json",
                        "schema": collection_schema()
                    }
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let post = server
        .mock("POST", "/api/users/alice/collections/")
        .match_body(Matcher::Json(json!({"name": "Chili", "description": "spicy"})))
        .with_status(201)
        .with_header("Location", "/api/users/alice/collections/Chili/")
        .create_async()
        .await;
    let created = server
        .mock("GET", "/api/users/alice/collections/Chili/")
        .with_status(200)
        .with_body(
            json!({
                "name": "Chili",
                "description": "spicy",
                "@controls": {"self": {"href": "/api/users/alice/collections/Chili/"}}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session
        .open("/api/users/alice/collections/", ResourceKind::CollectionList)
        .await;
    assert!(session.view().page.listing.as_ref().unwrap().is_empty());

    session.set_field("name", "Chili");
    session.set_field("description", "spicy");
    session.submit_form().await;

    let listing = session.view().page.listing.as_ref().unwrap();
    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].cells[0], "Chili");
    assert!(listing.empty_message.is_none());
    assert_eq!(
        session.view().notification,
        Notification::Message("Created Chili.".to_string())
    );

    list.assert_async().await;
    post.assert_async().await;
    created.assert_async().await;
}

#[tokio::test]
async fn detail_update_patches_fields_without_refetching() {
    let mut server = mockito::Server::new_async().await;
    let get = server
        .mock("GET", "/api/categories/Stew/")
        .with_status(200)
        .with_body(
            json!({
                "name": "Stew",
                "description": "Slow cooked",
                "@controls": {
                    "self": {"href": "/api/categories/Stew/"},
                    "fpoint:all-categories": {"href": "/api/categories/"},
                    "edit": {
                        "href": "/api/categories/Stew/",
                        "method": "PUT",
                        "encoding": "json",
                        "schema": category_schema()
                    }
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/categories/Stew/")
        .match_body(Matcher::Json(json!({"name": "Stews", "description": "Slow cooked"})))
        .with_status(204)
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session.open("/api/categories/Stew/", ResourceKind::Category).await;
    assert_eq!(session.view().page.title, "Stew");

    // Edit form is pre-filled from the document.
    assert_eq!(
        session.view().page.form.as_ref().unwrap().field("name").unwrap().value,
        "Stew"
    );
    session.set_field("name", "Stews");
    session.submit_form().await;

    assert_eq!(session.view().page.title, "Stews");
    assert_eq!(
        session.view().notification,
        Notification::Message("Saved.".to_string())
    );

    get.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn listing_update_refetches_the_reload_url() {
    let mut server = mockito::Server::new_async().await;
    let get = server
        .mock("GET", "/api/users/alice/collections/soups/")
        .with_status(200)
        .with_body(
            json!({
                "items": [],
                "@controls": {
                    "self": {"href": "/api/users/alice/collections/soups/"},
                    "edit": {
                        "href": "/api/users/alice/collections/soups/",
                        "method": "PUT",
                        "encoding": "json",
                        "schema": collection_schema()
                    }
                }
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/users/alice/collections/soups/")
        .with_status(204)
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session
        .open("/api/users/alice/collections/soups/", ResourceKind::Collection)
        .await;

    // Swap the page form for the collection's own edit form.
    session.begin_edit();
    assert_eq!(
        session.view().page.form.as_ref().unwrap().method,
        "PUT"
    );
    session.set_field("name", "Souper soups");
    session.submit_form().await;

    assert_eq!(
        session.view().notification,
        Notification::Message("Saved.".to_string())
    );
    get.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn delete_removes_exactly_the_matched_row() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/alice/collections/soups/")
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    {
                        "title": "Minestrone",
                        "description": "hearty",
                        "@controls": {
                            "self": {"href": "/api/users/alice/collections/soups/1/"},
                            "fpoint:delete": {"href": "/api/users/alice/collections/soups/1/", "method": "DELETE"}
                        }
                    },
                    {
                        "title": "Pho",
                        "description": "fragrant",
                        "@controls": {
                            "self": {"href": "/api/users/alice/collections/soups/2/"},
                            "fpoint:delete": {"href": "/api/users/alice/collections/soups/2/", "method": "DELETE"}
                        }
                    }
                ],
                "@controls": {"self": {"href": "/api/users/alice/collections/soups/"}}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let del = server
        .mock("DELETE", "/api/users/alice/collections/soups/1/")
        .with_status(204)
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session
        .open("/api/users/alice/collections/soups/", ResourceKind::Collection)
        .await;
    assert_eq!(session.view().page.listing.as_ref().unwrap().rows.len(), 2);

    session.delete_row("/api/users/alice/collections/soups/1/").await;

    let listing = session.view().page.listing.as_ref().unwrap();
    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].cells[0], "Pho");
    assert_eq!(
        session.view().notification,
        Notification::Message("Deleted.".to_string())
    );
    del.assert_async().await;
}

#[tokio::test]
async fn failed_delete_leaves_the_listing_unchanged() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/alice/collections/soups/")
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    {
                        "title": "Minestrone",
                        "description": "hearty",
                        "@controls": {
                            "self": {"href": "/api/users/alice/collections/soups/1/"},
                            "fpoint:delete": {"href": "/api/users/alice/collections/soups/1/", "method": "DELETE"}
                        }
                    }
                ],
                "@controls": {"self": {"href": "/api/users/alice/collections/soups/"}}
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("DELETE", "/api/users/alice/collections/soups/1/")
        .with_status(404)
        .with_body(json!({"@error": {"@message": "Recipe not found"}}).to_string())
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session
        .open("/api/users/alice/collections/soups/", ResourceKind::Collection)
        .await;

    session.delete_row("/api/users/alice/collections/soups/1/").await;

    assert_eq!(session.view().page.listing.as_ref().unwrap().rows.len(), 1);
    assert_eq!(
        session.view().notification,
        Notification::Error("Recipe not found".to_string())
    );
}

#[tokio::test]
async fn deleting_the_open_resource_returns_to_its_listing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/categories/Stew/")
        .with_status(200)
        .with_body(
            json!({
                "name": "Stew",
                "description": "Slow cooked",
                "@controls": {
                    "self": {"href": "/api/categories/Stew/"},
                    "fpoint:all-categories": {"href": "/api/categories/"},
                    "fpoint:delete": {"href": "/api/categories/Stew/", "method": "DELETE"}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let del = server
        .mock("DELETE", "/api/categories/Stew/")
        .with_status(204)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/categories/")
        .with_status(200)
        .with_body(
            json!({
                "items": [
                    {"name": "Soup", "description": "", "@controls": {"self": {"href": "/api/categories/Soup/"}}}
                ],
                "@controls": {"self": {"href": "/api/categories/"}}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session.open("/api/categories/Stew/", ResourceKind::Category).await;
    assert_eq!(session.view().page.title, "Stew");

    session.delete_current().await;

    assert_eq!(session.view().page.title, "Categories");
    let listing = session.view().page.listing.as_ref().unwrap();
    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].cells[0], "Soup");
    assert_eq!(
        session.view().notification,
        Notification::Message("Deleted.".to_string())
    );
    del.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn failed_fetch_keeps_the_previous_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/")
        .with_status(200)
        .with_body(
            json!({
                "@controls": {
                    "self": {"href": "/api/"},
                    "fpoint:all-users": {"href": "/api/users/"}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/users/ghost/")
        .with_status(404)
        .with_body(json!({"@error": {"@message": "User not found"}}).to_string())
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session.home().await;
    assert_eq!(session.view().page.title, "Welcome");

    session.lookup_user("ghost").await;

    // Error shown, prior page left in place.
    assert_eq!(
        session.view().notification,
        Notification::Error("User not found".to_string())
    );
    assert_eq!(session.view().page.title, "Welcome");
}

#[tokio::test]
async fn create_user_page_builds_the_schema_form() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_body(
            json!({
                "items": [],
                "@controls": {
                    "self": {"href": "/api/users/"},
                    "fpoint:add-user": {
                        "href": "/api/users/",
                        "method": "POST",
                        "encoding": "json",
                        "schema": {
                            "type": "object",
                            "properties": {
                                "name": {"description": "Name of user", "type": "string"},
                                "userName": {"description": "User unique identifer string", "type": "string"}
                            },
                            "required": ["name", "userName"]
                        }
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut session = session_for(&server).await;
    session.open("/api/users/", ResourceKind::UserList).await;

    assert_eq!(session.view().page.title, "Create a new user");
    let form = session.view().page.form.as_ref().unwrap();
    let names: Vec<_> = form.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["name", "userName"]);
    assert!(form.fields().iter().all(|f| f.required));
    assert_eq!(
        session.view().page.listing.as_ref().unwrap().empty_message.as_deref(),
        Some("No users registered yet.")
    );
}
