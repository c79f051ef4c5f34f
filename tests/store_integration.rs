//! Integration tests for the on-disk record store.
//!
//! Each test works against a fresh SQLite file in a temporary directory.

use image::{DynamicImage, Rgba, RgbaImage};
use recordkeep::codec;
use recordkeep::shell::{RecordView, SignatureCanvas, UpdateForm, UpdateInput};
use recordkeep::{Error, RecordFields, SqliteStore};

fn temp_store() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.db");
    (dir, path)
}

#[test]
fn test_table_created_on_first_use() {
    let (_dir, path) = temp_store();
    assert!(!path.exists());

    let store = SqliteStore::open(&path).expect("open");
    assert!(path.exists());
    assert_eq!(store.count().expect("count"), 0);
    assert!(store.read_all().expect("read_all").is_empty());
}

#[test]
fn test_records_persist_across_reopen() {
    let (_dir, path) = temp_store();
    let fields = RecordFields::new("persisted", 42, "2023-06-15");

    let id = {
        let store = SqliteStore::open(&path).expect("open");
        store.create(&fields).expect("create")
    };

    let store = SqliteStore::open(&path).expect("reopen");
    assert_eq!(store.read(id).expect("read").fields, fields);
}

#[test]
fn test_create_read_update_delete_scenario() {
    let (_dir, path) = temp_store();
    let store = SqliteStore::open(&path).expect("open");

    let id = store
        .create(&RecordFields::new("hello", 5, "2024-01-01"))
        .expect("create");

    let record = store.read(id).expect("read");
    assert_eq!(record.fields.text, "hello");
    assert_eq!(record.fields.number, 5);
    assert_eq!(record.fields.date, "2024-01-01");
    assert_eq!(record.fields.image, None);
    assert_eq!(record.fields.signature, None);

    let replacement = RecordFields::new("bye", 6, "2024-01-02");
    assert!(store.update(id, &replacement).expect("update"));
    assert_eq!(store.read(id).expect("read").fields, replacement);

    assert!(store.delete(id).expect("delete"));
    assert!(matches!(store.read(id), Err(Error::RecordNotFound(_))));
}

#[test]
fn test_missing_ids_leave_rows_untouched() {
    let (_dir, path) = temp_store();
    let store = SqliteStore::open(&path).expect("open");

    let a = store.create(&RecordFields::new("a", 1, "2024-01-01")).expect("create");
    let b = store.create(&RecordFields::new("b", 2, "2024-01-02")).expect("create");
    let before = store.read_all().expect("read_all");

    let missing = a.max(b) + 1;
    assert!(!store.update(missing, &RecordFields::new("x", 0, "x")).expect("update"));
    assert!(!store.delete(missing).expect("delete"));

    assert_eq!(store.read_all().expect("read_all"), before);
}

#[test]
fn test_images_roundtrip_through_store() {
    let (_dir, path) = temp_store();
    let store = SqliteStore::open(&path).expect("open");

    let photo = DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 9, |x, y| {
        Rgba([x as u8 * 10, y as u8 * 20, 128, 255])
    }));
    let image_blob = codec::encode_png(&photo).expect("encode");

    let mut canvas = SignatureCanvas::default();
    canvas.draw_stroke(&[(20, 20), (120, 80), (200, 30)]);
    let signature_blob = canvas.to_png().expect("signature");

    let id = store
        .create(
            &RecordFields::new("with pictures", 1, "2024-03-03")
                .with_image(Some(image_blob))
                .with_signature(Some(signature_blob)),
        )
        .expect("create");

    let stored = store.read(id).expect("read").fields;
    let image = codec::decode(stored.image.as_deref().expect("image")).expect("decode");
    assert_eq!(image.to_rgba8().as_raw(), photo.to_rgba8().as_raw());

    let signature = codec::decode(stored.signature.as_deref().expect("signature")).expect("decode");
    assert_eq!((signature.width(), signature.height()), (400, 150));
    assert_eq!(signature.to_rgba8().as_raw().as_slice(), canvas.rgba());
}

#[test]
fn test_listing_survives_malformed_blob() {
    let (_dir, path) = temp_store();
    let store = SqliteStore::open(&path).expect("open");

    let good = SignatureCanvas::new(10, 10).to_png().expect("png");
    store
        .create(&RecordFields::new("broken", 1, "2024-01-01").with_image(Some(vec![0xde, 0xad])))
        .expect("create");
    store
        .create(&RecordFields::new("fine", 2, "2024-01-01").with_image(Some(good)))
        .expect("create");

    let views: Vec<RecordView> = store.read_all().expect("read_all").iter().map(RecordView::new).collect();
    assert_eq!(views.len(), 2);

    let broken = views.iter().find(|v| v.summary.text == "broken").expect("broken");
    let fine = views.iter().find(|v| v.summary.text == "fine").expect("fine");
    assert_eq!(broken.image.to_string(), "malformed image");
    assert_eq!(fine.image.to_string(), "10x10");
}

#[test]
fn test_update_form_against_file_store() {
    let (_dir, path) = temp_store();
    let store = SqliteStore::open(&path).expect("open");

    let id = store.create(&RecordFields::new("draft", 3, "2024-05-05")).expect("create");

    let form = UpdateForm::fetch(&store, id).expect("fetch");
    let input = UpdateInput {
        number: Some(4),
        ..Default::default()
    };
    assert!(form.submit(&store, input).expect("submit"));

    assert_eq!(
        store.read(id).expect("read").fields,
        RecordFields::new("draft", 4, "2024-05-05")
    );
    assert!(matches!(UpdateForm::fetch(&store, id + 1), Err(Error::RecordNotFound(_))));
}

#[test]
fn test_open_in_missing_directory_is_storage_error() {
    let (dir, _) = temp_store();
    let path = dir.path().join("no-such-dir").join("data.db");

    let result = SqliteStore::open(&path);
    assert!(matches!(result, Err(Error::Storage(_))));
    assert!(!path.exists());
}
