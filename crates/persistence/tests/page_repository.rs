//! Integration tests for the page repository against in-memory SQLite.

use domain::models::{GalleryBlock, NewPage, PageContent, PageKind, RichText};
use persistence::db::{create_pool, DatabaseConfig};
use persistence::entities::PageKindDb;
use persistence::repositories::PageRepository;

async fn test_repository() -> PageRepository {
    let config = DatabaseConfig {
        engine: "sqlite".to_string(),
        name: ":memory:".to_string(),
        user: String::new(),
        password: String::new(),
        host: String::new(),
        port: String::new(),
        max_connections: 1,
    };
    let pool = create_pool(&config).await.expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    PageRepository::new(pool)
}

fn new_page(parent_id: Option<i64>, slug: &str, kind: PageKind) -> NewPage {
    NewPage {
        parent_id,
        slug: slug.to_string(),
        title: slug.to_string(),
        content: PageContent::empty(kind),
    }
}

#[tokio::test]
async fn test_create_and_find_roundtrip() {
    let repo = test_repository().await;

    let created = repo
        .create_page(&NewPage {
            parent_id: None,
            slug: "home".to_string(),
            title: "Welcome".to_string(),
            content: PageContent::Home {
                body: RichText::from("<p>Hello</p>"),
                about_page: None,
                gallery_page: None,
                contact_page: None,
            },
        })
        .await
        .unwrap();

    assert_eq!(created.slug, "home");
    assert_eq!(created.title, "Welcome");
    assert_eq!(created.kind, PageKindDb::Home);
    assert_eq!(created.body.as_deref(), Some("<p>Hello</p>"));
    assert!(!created.live);
    assert!(created.first_published_at.is_none());

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.slug, "home");
}

#[tokio::test]
async fn test_depth_and_position_assignment() {
    let repo = test_repository().await;

    let home = repo
        .create_page(&new_page(None, "home", PageKind::Home))
        .await
        .unwrap();
    assert_eq!(home.depth, 0);
    assert_eq!(home.position, 0);

    let about = repo
        .create_page(&new_page(Some(home.id), "about", PageKind::About))
        .await
        .unwrap();
    let gallery = repo
        .create_page(&new_page(Some(home.id), "gallery", PageKind::Gallery))
        .await
        .unwrap();

    assert_eq!(about.depth, 1);
    assert_eq!(about.position, 0);
    assert_eq!(gallery.depth, 1);
    assert_eq!(gallery.position, 1);

    let children = repo.find_children(home.id).await.unwrap();
    let slugs: Vec<&str> = children.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["about", "gallery"]);
}

#[tokio::test]
async fn test_duplicate_sibling_slug_rejected() {
    let repo = test_repository().await;

    let home = repo
        .create_page(&new_page(None, "home", PageKind::Home))
        .await
        .unwrap();
    repo.create_page(&new_page(Some(home.id), "about", PageKind::About))
        .await
        .unwrap();

    let err = repo
        .create_page(&new_page(Some(home.id), "about", PageKind::Contact))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert!(db_err.message().contains("UNIQUE"));
        }
        other => panic!("expected database error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_same_slug_under_different_parents_is_fine() {
    let repo = test_repository().await;

    let a = repo
        .create_page(&new_page(None, "a", PageKind::Home))
        .await
        .unwrap();
    let b = repo
        .create_page(&new_page(None, "b", PageKind::Home))
        .await
        .unwrap();

    repo.create_page(&new_page(Some(a.id), "news", PageKind::About))
        .await
        .unwrap();
    repo.create_page(&new_page(Some(b.id), "news", PageKind::About))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_find_child_by_slug() {
    let repo = test_repository().await;

    let home = repo
        .create_page(&new_page(None, "home", PageKind::Home))
        .await
        .unwrap();
    let about = repo
        .create_page(&new_page(Some(home.id), "about", PageKind::About))
        .await
        .unwrap();

    let found = repo
        .find_child_by_slug(Some(home.id), "about")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, about.id);

    let root = repo.find_child_by_slug(None, "home").await.unwrap().unwrap();
    assert_eq!(root.id, home.id);

    assert!(repo
        .find_child_by_slug(Some(home.id), "missing")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_rename_partial_update() {
    let repo = test_repository().await;

    let page = repo
        .create_page(&new_page(None, "about", PageKind::About))
        .await
        .unwrap();

    let renamed = repo
        .rename_page(page.id, Some("About the Artist"), None)
        .await
        .unwrap();
    assert_eq!(renamed.title, "About the Artist");
    assert_eq!(renamed.slug, "about");

    let renamed = repo
        .rename_page(page.id, None, Some("about-artist"))
        .await
        .unwrap();
    assert_eq!(renamed.title, "About the Artist");
    assert_eq!(renamed.slug, "about-artist");
}

#[tokio::test]
async fn test_update_content_rejects_kind_mismatch() {
    let repo = test_repository().await;

    let page = repo
        .create_page(&new_page(None, "about", PageKind::About))
        .await
        .unwrap();

    let err = repo
        .update_content(
            page.id,
            &PageContent::Gallery {
                gallery_images: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Protocol(msg) => {
            assert!(msg.contains("does not match"));
        }
        other => panic!("expected protocol error, got {:?}", other),
    }

    // The stored payload is untouched.
    let found = repo.find_by_id(page.id).await.unwrap().unwrap();
    assert_eq!(found.kind, PageKindDb::About);
}

#[tokio::test]
async fn test_gallery_content_roundtrip() {
    let repo = test_repository().await;

    let page = repo
        .create_page(&NewPage {
            parent_id: None,
            slug: "gallery".to_string(),
            title: "Gallery".to_string(),
            content: PageContent::Gallery {
                gallery_images: vec![GalleryBlock::Image(11), GalleryBlock::Image(7)],
            },
        })
        .await
        .unwrap();

    let found: domain::models::Page = repo.find_by_id(page.id).await.unwrap().unwrap().into();
    match found.content {
        PageContent::Gallery { gallery_images } => {
            assert_eq!(
                gallery_images,
                vec![GalleryBlock::Image(11), GalleryBlock::Image(7)]
            );
        }
        other => panic!("unexpected content: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_gallery_roundtrips_as_empty() {
    let repo = test_repository().await;

    let page = repo
        .create_page(&new_page(None, "gallery", PageKind::Gallery))
        .await
        .unwrap();

    let updated = repo
        .update_content(
            page.id,
            &PageContent::Gallery {
                gallery_images: Vec::new(),
            },
        )
        .await
        .unwrap();

    let found: domain::models::Page = updated.into();
    match found.content {
        PageContent::Gallery { gallery_images } => assert!(gallery_images.is_empty()),
        other => panic!("unexpected content: {:?}", other),
    }
}

#[tokio::test]
async fn test_publish_and_unpublish_timestamps() {
    let repo = test_repository().await;

    let page = repo
        .create_page(&new_page(None, "about", PageKind::About))
        .await
        .unwrap();

    let published = repo.publish(page.id).await.unwrap();
    assert!(published.live);
    let first = published.first_published_at.unwrap();
    assert_eq!(published.last_published_at.unwrap(), first);

    let offline = repo.unpublish(page.id).await.unwrap();
    assert!(!offline.live);
    // Published timestamps survive unpublishing.
    assert_eq!(offline.first_published_at.unwrap(), first);

    let republished = repo.publish(page.id).await.unwrap();
    // First publication timestamp is set exactly once.
    assert_eq!(republished.first_published_at.unwrap(), first);
    assert!(republished.last_published_at.unwrap() >= first);
}

#[tokio::test]
async fn test_delete_cascades_to_subtree() {
    let repo = test_repository().await;

    let home = repo
        .create_page(&new_page(None, "home", PageKind::Home))
        .await
        .unwrap();
    let about = repo
        .create_page(&new_page(Some(home.id), "about", PageKind::About))
        .await
        .unwrap();
    let nested = repo
        .create_page(&new_page(Some(about.id), "cv", PageKind::About))
        .await
        .unwrap();

    let deleted = repo.delete_page(home.id).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(repo.find_by_id(home.id).await.unwrap().is_none());
    assert!(repo.find_by_id(about.id).await.unwrap().is_none());
    assert!(repo.find_by_id(nested.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_target_nulls_menu_reference() {
    let repo = test_repository().await;

    let about = repo
        .create_page(&new_page(None, "about", PageKind::About))
        .await
        .unwrap();
    let home = repo
        .create_page(&NewPage {
            parent_id: None,
            slug: "home".to_string(),
            title: "Home".to_string(),
            content: PageContent::Home {
                body: RichText::default(),
                about_page: Some(about.id),
                gallery_page: None,
                contact_page: None,
            },
        })
        .await
        .unwrap();
    assert_eq!(home.about_page_id, Some(about.id));

    repo.delete_page(about.id).await.unwrap();

    // The home page survives with the dangling reference cleared.
    let found = repo.find_by_id(home.id).await.unwrap().unwrap();
    assert_eq!(found.about_page_id, None);
}

#[tokio::test]
async fn test_delete_missing_page_affects_nothing() {
    let repo = test_repository().await;
    assert_eq!(repo.delete_page(999).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_by_kind() {
    let repo = test_repository().await;

    let home = repo
        .create_page(&new_page(None, "home", PageKind::Home))
        .await
        .unwrap();
    repo.create_page(&new_page(Some(home.id), "about", PageKind::About))
        .await
        .unwrap();
    repo.create_page(&new_page(Some(home.id), "atelier", PageKind::About))
        .await
        .unwrap();

    let about_pages = repo.list_by_kind(PageKind::About).await.unwrap();
    assert_eq!(about_pages.len(), 2);
    assert!(about_pages.iter().all(|p| p.kind == PageKindDb::About));

    assert!(repo.list_by_kind(PageKind::Contact).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_home_menu() {
    let repo = test_repository().await;

    let about = repo
        .create_page(&new_page(None, "about", PageKind::About))
        .await
        .unwrap();
    let gallery = repo
        .create_page(&new_page(None, "gallery", PageKind::Gallery))
        .await
        .unwrap();
    repo.publish(gallery.id).await.unwrap();

    let home = repo
        .create_page(&NewPage {
            parent_id: None,
            slug: "home".to_string(),
            title: "Home".to_string(),
            content: PageContent::Home {
                body: RichText::default(),
                about_page: Some(about.id),
                gallery_page: Some(gallery.id),
                contact_page: None,
            },
        })
        .await
        .unwrap();

    let menu = repo.resolve_home_menu(home.id).await.unwrap().unwrap();
    let [about_link, gallery_link, contact_link] = menu.links();

    let about_link = about_link.unwrap();
    assert_eq!(about_link.slug, "about");
    assert!(!about_link.live);

    let gallery_link = gallery_link.unwrap();
    assert_eq!(gallery_link.slug, "gallery");
    assert!(gallery_link.live);

    assert!(contact_link.is_none());

    // A non-home page has no menu.
    assert!(repo.resolve_home_menu(about.id).await.unwrap().is_none());
}
