pub mod boxes;
pub mod items;
pub mod labels;
pub mod transfer;

use std::sync::Arc;

use axum::Router;

use qrbox_core::Authenticator;

use crate::store::InventoryStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub auth: Arc<dyn Authenticator>,
    /// Public base URL that printed codes point at, without trailing '/'.
    pub base_url: Arc<str>,
}

/// Build the inventory router: HTML pages, form posts, images and
/// JSON transfer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(boxes::routes())
        .merge(items::routes())
        .merge(labels::routes())
        .merge(transfer::routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use qrbox_core::{AllowAll, PinGate};

    use crate::store::FileInventory;

    const BASE: &str = "http://inv.example";

    struct Harness {
        router: Router,
        store: Arc<FileInventory>,
        _dir: tempfile::TempDir,
    }

    fn harness(auth: Arc<dyn Authenticator>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileInventory::open(&dir.path().join("boxes.json")).unwrap());
        let state = AppState {
            store: store.clone(),
            auth,
            base_url: Arc::from(BASE),
        };
        Harness {
            router: router(state),
            store,
            _dir: dir,
        }
    }

    fn open() -> Harness {
        harness(Arc::new(AllowAll))
    }

    fn encode(s: &str) -> String {
        let mut out = String::new();
        for b in s.bytes() {
            if b.is_ascii_alphanumeric() {
                out.push(b as char);
            } else {
                out.push_str(&format!("%{b:02X}"));
            }
        }
        out
    }

    fn form(fields: &[(&str, &str)]) -> String {
        fields
            .iter()
            .map(|(k, v)| format!("{k}={}", encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    struct Reply {
        status: StatusCode,
        location: Option<String>,
        content_type: Option<String>,
        disposition: Option<String>,
        body: Vec<u8>,
    }

    impl Reply {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.body).into_owned()
        }

        fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    async fn send(router: &Router, req: Request<Body>) -> Reply {
        let resp = router.clone().oneshot(req).await.unwrap();
        let header_of = |name: header::HeaderName| {
            resp.headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        let status = resp.status();
        let location = header_of(header::LOCATION);
        let content_type = header_of(header::CONTENT_TYPE);
        let disposition = header_of(header::CONTENT_DISPOSITION);
        let body = axum::body::to_bytes(resp.into_body(), 16 * 1024 * 1024)
            .await
            .unwrap()
            .to_vec();
        Reply {
            status,
            location,
            content_type,
            disposition,
            body,
        }
    }

    async fn get(router: &Router, uri: &str) -> Reply {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, req).await
    }

    async fn post(router: &Router, uri: &str, fields: &[(&str, &str)]) -> Reply {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form(fields)))
            .unwrap();
        send(router, req).await
    }

    async fn upload(router: &Router, json: &str, pin: Option<&str>) -> Reply {
        let boundary = "XBOUNDARYX";
        let mut body = String::new();
        if let Some(pin) = pin {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"pin\"\r\n\r\n{pin}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"boxes.json\"\r\nContent-Type: application/json\r\n\r\n{json}\r\n--{boundary}--\r\n"
        ));
        let req = Request::builder()
            .method("POST")
            .uri("/import")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        send(router, req).await
    }

    fn only_box_id(h: &Harness) -> String {
        let boxes = h.store.list_boxes().unwrap();
        assert_eq!(boxes.len(), 1);
        boxes[0].id.clone()
    }

    #[tokio::test]
    async fn add_box_with_item_list() {
        let h = open();
        let r = post(
            &h.router,
            "/boxes",
            &[
                ("name", "Camping Gear"),
                ("location", "Garage"),
                ("items", "Tent,1\nSleeping bag,2\nCamp stove x 1\n\nLantern"),
            ],
        )
        .await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);
        assert_eq!(r.location.as_deref(), Some("/"));

        let id = only_box_id(&h);
        let b = h.store.get_box(&id).unwrap();
        let items: Vec<(&str, u32)> = b.items.iter().map(|i| (i.name.as_str(), i.qty)).collect();
        assert_eq!(
            items,
            vec![("Tent", 1), ("Sleeping bag", 2), ("Camp stove", 1), ("Lantern", 1)]
        );

        let page = get(&h.router, "/").await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.text().contains("Camping Gear"));
        assert!(page.text().contains(&format!("/b/{id}")));
    }

    #[tokio::test]
    async fn blank_box_name_is_rejected() {
        let h = open();
        let r = post(&h.router, "/boxes", &[("name", "   ")]).await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST);
        assert_eq!(r.json()["code"], "VALIDATION_FAILED");
        assert!(h.store.list_boxes().unwrap().is_empty());
    }

    #[tokio::test]
    async fn public_and_admin_pages() {
        let h = open();
        let b = h.store.add_box("Books", "Attic", vec![]).unwrap();

        let public = get(&h.router, &format!("/b/{}", b.id)).await;
        assert_eq!(public.status, StatusCode::OK);
        assert!(public.text().contains("Books"));
        assert!(public.text().contains("Attic"));

        let admin = get(&h.router, &format!("/boxes/{}", b.id)).await;
        assert_eq!(admin.status, StatusCode::OK);
        assert!(admin.text().contains("/boxes/delete"));

        let missing = get(&h.router, "/b/nope").await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.json()["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_box_redirects_to_edit_page() {
        let h = open();
        let b = h.store.add_box("Books", "", vec![]).unwrap();
        let r = post(
            &h.router,
            "/boxes/update",
            &[("box_id", b.id.as_str()), ("name", " Novels "), ("location", "Hall")],
        )
        .await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);
        assert_eq!(r.location, Some(format!("/boxes/{}", b.id)));
        let after = h.store.get_box(&b.id).unwrap();
        assert_eq!(after.name, "Novels");
        assert_eq!(after.location, "Hall");
    }

    #[tokio::test]
    async fn delete_requires_typed_confirmation() {
        let h = open();
        let b = h.store.add_box("Old stuff", "", vec![]).unwrap();

        let r = post(&h.router, "/boxes/delete", &[("box_id", b.id.as_str()), ("confirm", "yes")]).await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST);
        assert_eq!(h.store.list_boxes().unwrap().len(), 1);

        let r = post(&h.router, "/boxes/delete", &[("box_id", b.id.as_str()), ("confirm", " delete ")]).await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);
        assert!(h.store.list_boxes().unwrap().is_empty());

        let again = post(&h.router, "/boxes/delete", &[("box_id", b.id.as_str()), ("confirm", "DELETE")]).await;
        assert_eq!(again.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn item_lifecycle_over_forms() {
        let h = open();
        let b = h.store.add_box("Kitchen", "", vec![]).unwrap();
        let edit = format!("/boxes/{}", b.id);

        let r = post(&h.router, "/items", &[("box_id", b.id.as_str()), ("name", "Pan"), ("qty", "abc")]).await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);
        assert_eq!(r.location.as_deref(), Some(edit.as_str()));
        post(&h.router, "/items", &[("box_id", b.id.as_str()), ("name", "Pot"), ("qty", "3")]).await;

        let r = post(
            &h.router,
            "/items/update",
            &[("box_id", b.id.as_str()), ("idx", "0"), ("name", "Frying pan"), ("qty", "-4")],
        )
        .await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);

        let items = h.store.get_box(&b.id).unwrap().items;
        assert_eq!(items[0].name, "Frying pan");
        assert_eq!(items[0].qty, 1);
        assert_eq!(items[1].qty, 3);

        let r = post(&h.router, "/items/delete", &[("box_id", b.id.as_str()), ("idx", "0")]).await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);
        let items = h.store.get_box(&b.id).unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Pot");
    }

    #[tokio::test]
    async fn bad_item_index_is_not_found() {
        let h = open();
        let b = h.store.add_box("Kitchen", "", vec![]).unwrap();
        for idx in ["x", "5", ""] {
            let r = post(&h.router, "/items/delete", &[("box_id", b.id.as_str()), ("idx", idx)]).await;
            assert_eq!(r.status, StatusCode::NOT_FOUND, "idx {idx:?}");
        }
        let r = post(&h.router, "/items", &[("box_id", "missing"), ("name", "Pan")]).await;
        assert_eq!(r.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn pin_gate_blocks_mutations_only() {
        let h = harness(Arc::new(PinGate::new("4321")));

        let denied = post(&h.router, "/boxes", &[("name", "Tools")]).await;
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
        assert_eq!(denied.json()["code"], "PERMISSION_DENIED");

        let wrong = post(&h.router, "/boxes", &[("name", "Tools"), ("pin", "0000")]).await;
        assert_eq!(wrong.status, StatusCode::FORBIDDEN);
        assert!(h.store.list_boxes().unwrap().is_empty());

        let ok = post(&h.router, "/boxes", &[("name", "Tools"), ("pin", "4321")]).await;
        assert_eq!(ok.status, StatusCode::SEE_OTHER);

        let id = only_box_id(&h);
        assert_eq!(get(&h.router, "/").await.status, StatusCode::OK);
        assert_eq!(get(&h.router, &format!("/b/{id}")).await.status, StatusCode::OK);

        let denied = upload(&h.router, r#"{"boxes": []}"#, Some("nope")).await;
        assert_eq!(denied.status, StatusCode::FORBIDDEN);
        assert_eq!(h.store.list_boxes().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn export_is_a_download() {
        let h = open();
        h.store.add_box("Books", "", vec![]).unwrap();
        let r = get(&h.router, "/export").await;
        assert_eq!(r.status, StatusCode::OK);
        assert_eq!(r.content_type.as_deref(), Some("application/json"));
        assert_eq!(
            r.disposition.as_deref(),
            Some("attachment; filename=\"boxes.json\"")
        );
        assert_eq!(r.json()["boxes"][0]["name"], "Books");
    }

    #[tokio::test]
    async fn import_replaces_document() {
        let h = open();
        h.store.add_box("Old", "", vec![]).unwrap();

        let json = r#"{"boxes": [{"id": "a1", "name": "Imported", "items": [{"name": "Cable"}]}]}"#;
        let r = upload(&h.router, json, None).await;
        assert_eq!(r.status, StatusCode::SEE_OTHER);
        assert_eq!(r.location.as_deref(), Some("/"));

        let boxes = h.store.list_boxes().unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].id, "a1");
        assert_eq!(boxes[0].location, "");
        assert_eq!(boxes[0].items[0].qty, 1);
    }

    #[tokio::test]
    async fn bad_import_changes_nothing() {
        let h = open();
        h.store.add_box("Keep", "", vec![]).unwrap();

        let r = upload(&h.router, "not json", None).await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST);

        let dup = r#"{"boxes": [{"id": "x", "name": "A"}, {"id": "x", "name": "B"}]}"#;
        let r = upload(&h.router, dup, None).await;
        assert_eq!(r.status, StatusCode::BAD_REQUEST);

        let boxes = h.store.list_boxes().unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].name, "Keep");
    }

    #[tokio::test]
    async fn qr_images() {
        let h = open();
        let b = h.store.add_box("Books", "", vec![]).unwrap();

        let png = get(&h.router, &format!("/qr/{}?style=qr&size=120", b.id)).await;
        assert_eq!(png.status, StatusCode::OK);
        assert_eq!(png.content_type.as_deref(), Some("image/png"));
        assert_eq!(&png.body[..4], b"\x89PNG");

        let label = get(&h.router, &format!("/qr/{}", b.id)).await;
        assert_eq!(label.status, StatusCode::OK);
        assert_eq!(label.content_type.as_deref(), Some("image/svg+xml"));
        assert!(label.text().contains("Books"));

        assert_eq!(get(&h.router, "/qr/missing").await.status, StatusCode::NOT_FOUND);

        let sheet = get(&h.router, "/labels").await;
        assert!(sheet.text().contains(&format!("/qr/{}?style=label", b.id)));
    }

    #[tokio::test]
    async fn corrupt_store_is_reported() {
        let h = open();
        std::fs::write(h.store.path(), "{ not json").unwrap();

        let r = get(&h.router, "/").await;
        assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(r.json()["code"], "STORE_CORRUPT");

        let r = post(&h.router, "/boxes", &[("name", "New")]).await;
        assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(std::fs::read_to_string(h.store.path()).unwrap(), "{ not json");
    }
}
