use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use chrono::Duration;
use repositories::memory::MemoryEngine;
use routing::TokenKeys;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use trust_core::ContentEngine;
use trust_core::defaults::SingletonDefaults;
use trust_core::model::EntityId;
use trust_routes::routes;
use trust_routes::state::TrustAppState;

struct Context {
    server: TestServer,
    engine: MemoryEngine,
    token: String,
    admin_id: EntityId,
}

#[fixture]
async fn context() -> Context {
    start(|state| state).await
}

async fn start(
    configure: impl FnOnce(TrustAppState<MemoryEngine>) -> TrustAppState<MemoryEngine>,
) -> Context {
    let engine = MemoryEngine::default();
    let state = configure(TrustAppState::new(
        engine.clone(),
        SingletonDefaults::default(),
        TokenKeys::from_secret(b"api-tests", Duration::days(30)),
        4,
    ));
    let server = TestServer::new(routes::build(state, None)).unwrap();

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "admin", "password": "s3cret" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let session: Value = response.json();

    Context {
        server,
        engine,
        token: session["token"].as_str().unwrap().to_string(),
        admin_id: session["_id"].as_str().unwrap().parse().unwrap(),
    }
}

fn event(day: u32) -> Value {
    json!({
        "title": { "english": format!("Day {day}"), "marathi": format!("दिवस {day}") },
        "date": format!("Day {day}"),
        "time": "6-8 AM",
        "activities": { "english": "Aarti", "marathi": "आरती" },
    })
}

fn activity(section_type: &str, title: &str) -> Value {
    json!({
        "sectionType": section_type,
        "title": { "english": title, "marathi": title },
        "description": { "english": "Every weekend", "marathi": "प्रत्येक शनिवार-रविवार" },
        "imageUrl": "https://img.example/activity.jpg",
        "icon": "ri-heart-line",
    })
}

fn sponsor(name: &str) -> Value {
    json!({
        "name": name,
        "logoUrl": "https://img.example/logo.png",
        "description": { "english": "Main sponsor", "marathi": "मुख्य प्रायोजक" },
        "category": { "english": "Gold", "marathi": "सुवर्ण" },
    })
}

fn orders(listed: &Value) -> Vec<i64> {
    listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["order"].as_i64().unwrap())
        .collect()
}

fn ids(listed: &Value) -> Vec<String> {
    listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["_id"].as_str().unwrap().to_string())
        .collect()
}

#[rstest]
#[tokio::test]
async fn greeting(#[future(awt)] context: Context) {
    let response = context.server.get("/api").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Hello from the Mandal Backend!" }));
}

#[rstest]
#[tokio::test]
async fn events_are_appended_in_order(#[future(awt)] context: Context) {
    let server = &context.server;

    let first = server
        .post("/api/events")
        .authorization_bearer(&context.token)
        .json(&event(1))
        .await;
    first.assert_status(StatusCode::CREATED);
    assert_eq!(0, first.json::<Value>()["order"], "first event starts the sequence");

    let second = server
        .post("/api/events")
        .authorization_bearer(&context.token)
        .json(&event(2))
        .await;
    assert_eq!(1, second.json::<Value>()["order"], "second event goes after the first");

    let listed: Value = server.get("/api/events").await.json();
    assert_eq!(vec![0, 1], orders(&listed));
    assert_eq!("Day 1", listed[0]["title"]["english"]);
}

#[rstest]
#[tokio::test]
async fn activity_sections_are_ordered_independently(#[future(awt)] context: Context) {
    let server = &context.server;

    for (section, title) in [("social", "Blood drive"), ("cultural", "Lezim"), ("social", "Meals")] {
        server
            .post("/api/activities")
            .authorization_bearer(&context.token)
            .json(&activity(section, title))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let social: Value = server.get("/api/activities/social").await.json();
    let cultural: Value = server.get("/api/activities/cultural").await.json();
    assert_eq!(vec![0, 1], orders(&social));
    assert_eq!(vec![0], orders(&cultural));
    assert_eq!("Lezim", cultural[0]["title"]["english"]);

    let unknown = server.get("/api/activities/sports").await;
    unknown.assert_status_ok();
    unknown.assert_json(&json!([]));
}

#[rstest]
#[tokio::test]
async fn activity_update_keeps_section_and_order(#[future(awt)] context: Context) {
    let server = &context.server;
    let created: Value = server
        .post("/api/activities")
        .authorization_bearer(&context.token)
        .json(&activity("cultural", "Lezim"))
        .await
        .json();

    let updated = server
        .put(&format!("/api/activities/{}", created["_id"].as_str().unwrap()))
        .authorization_bearer(&context.token)
        .json(&json!({
            "title": { "english": "Dhol tasha", "marathi": "ढोल ताशा" },
            "description": { "english": "Practice", "marathi": "सराव" },
            "imageUrl": "https://img.example/dhol.jpg",
            "icon": "ri-music-line",
        }))
        .await;

    updated.assert_status_ok();
    let updated: Value = updated.json();
    assert_eq!("cultural", updated["sectionType"]);
    assert_eq!(created["order"], updated["order"]);
    assert_eq!("Dhol tasha", updated["title"]["english"]);
}

#[rstest]
#[tokio::test]
async fn members_are_listed_by_group(#[future(awt)] context: Context) {
    let server = &context.server;
    let members = [
        json!({ "name": { "english": "Ravi", "marathi": "रवी" } }),
        json!({
            "name": { "english": "Sunita", "marathi": "सुनीता" },
            "isFeatured": true,
            "designation": { "english": "President", "marathi": "अध्यक्ष" },
            "imageUrl": "https://img.example/sunita.jpg",
        }),
        json!({ "name": { "english": "Amit", "marathi": "अमित" }, "isFeatured": false }),
    ];
    for member in &members {
        server
            .post("/api/members")
            .authorization_bearer(&context.token)
            .json(member)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let featured: Value = server.get("/api/members?featured=true").await.json();
    assert_eq!(1, featured.as_array().unwrap().len());
    assert_eq!(true, featured[0]["isFeatured"]);
    assert_eq!(0, featured[0]["order"]);

    let regular: Value = server.get("/api/members?featured=false").await.json();
    let omitted: Value = server.get("/api/members").await.json();
    assert_eq!(vec![0, 1], orders(&regular));
    assert_eq!(regular, omitted, "no filter lists the regular members");
}

#[rstest]
#[tokio::test]
async fn featured_member_needs_designation_and_image(#[future(awt)] context: Context) {
    let response = context
        .server
        .post("/api/members")
        .authorization_bearer(&context.token)
        .json(&json!({
            "name": { "english": "Sunita", "marathi": "सुनीता" },
            "isFeatured": true,
        }))
        .await;

    response.assert_status_bad_request();
    let listed: Value = context.server.get("/api/members?featured=true").await.json();
    assert_eq!(json!([]), listed);
}

#[rstest]
#[tokio::test]
async fn promoting_a_member_needs_an_image(#[future(awt)] context: Context) {
    let server = &context.server;
    let created: Value = server
        .post("/api/members")
        .authorization_bearer(&context.token)
        .json(&json!({ "name": { "english": "Ravi", "marathi": "रवी" } }))
        .await
        .json();

    let response = server
        .put(&format!("/api/members/{}", created["_id"].as_str().unwrap()))
        .authorization_bearer(&context.token)
        .json(&json!({
            "name": { "english": "Ravi", "marathi": "रवी" },
            "isFeatured": true,
            "designation": { "english": "Treasurer", "marathi": "खजिनदार" },
        }))
        .await;

    response.assert_status_bad_request();
    assert!(
        response.json::<Value>()["message"]
            .as_str()
            .unwrap()
            .contains("imageUrl")
    );
    let featured: Value = server.get("/api/members?featured=true").await.json();
    assert_eq!(json!([]), featured, "the member stays a regular member");
}

#[rstest]
#[tokio::test]
async fn demoted_member_loses_designation(#[future(awt)] context: Context) {
    let server = &context.server;
    let created: Value = server
        .post("/api/members")
        .authorization_bearer(&context.token)
        .json(&json!({
            "name": { "english": "Sunita", "marathi": "सुनीता" },
            "isFeatured": true,
            "designation": { "english": "President", "marathi": "अध्यक्ष" },
            "imageUrl": "https://img.example/sunita.jpg",
        }))
        .await
        .json();

    let updated: Value = server
        .put(&format!("/api/members/{}", created["_id"].as_str().unwrap()))
        .authorization_bearer(&context.token)
        .json(&json!({
            "name": { "english": "Sunita", "marathi": "सुनीता" },
            "isFeatured": false,
            "designation": { "english": "President", "marathi": "अध्यक्ष" },
        }))
        .await
        .json();

    assert_eq!(false, updated["isFeatured"]);
    assert!(updated.get("designation").is_none());
}

#[rstest]
#[tokio::test]
async fn deleting_a_missing_sponsor_is_not_found(#[future(awt)] context: Context) {
    let server = &context.server;
    server
        .post("/api/sponsors")
        .authorization_bearer(&context.token)
        .json(&sponsor("Kirana stores"))
        .await
        .assert_status(StatusCode::CREATED);

    for id in [EntityId::new().to_string(), "not-an-id".to_string()] {
        let response = server
            .delete(&format!("/api/sponsors/{id}"))
            .authorization_bearer(&context.token)
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "Sponsor not found" }));
    }

    let listed: Value = server.get("/api/sponsors").await.json();
    assert_eq!(1, listed.as_array().unwrap().len());
}

#[rstest]
#[tokio::test]
async fn delete_leaves_gaps_in_the_order(#[future(awt)] context: Context) {
    let server = &context.server;
    let mut created = Vec::new();
    for name in ["A", "B", "C"] {
        let sponsor: Value = server
            .post("/api/sponsors")
            .authorization_bearer(&context.token)
            .json(&sponsor(name))
            .await
            .json();
        created.push(sponsor);
    }

    let response = server
        .delete(&format!("/api/sponsors/{}", created[1]["_id"].as_str().unwrap()))
        .authorization_bearer(&context.token)
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Sponsor deleted successfully" }));

    let appended: Value = server
        .post("/api/sponsors")
        .authorization_bearer(&context.token)
        .json(&sponsor("D"))
        .await
        .json();
    assert_eq!(3, appended["order"]);

    let listed: Value = server.get("/api/sponsors").await.json();
    assert_eq!(vec![0, 2, 3], orders(&listed));
}

#[rstest]
#[tokio::test]
async fn reorder_is_applied_and_repeatable(#[future(awt)] context: Context) {
    let server = &context.server;
    for day in 1..=3 {
        server
            .post("/api/events")
            .authorization_bearer(&context.token)
            .json(&event(day))
            .await;
    }
    let listed: Value = server.get("/api/events").await.json();
    let before = ids(&listed);
    let assignments = json!([
        { "_id": before[0], "order": 2 },
        { "_id": before[1], "order": 1 },
        { "id": before[2], "order": 0 },
        { "_id": EntityId::new().to_string(), "order": 9 },
    ]);

    for _ in 0..2 {
        let response = server
            .put("/api/events/order")
            .authorization_bearer(&context.token)
            .json(&assignments)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "message": "Event order updated successfully",
            "requested": 4,
            "updated": 3,
            "missing": 1,
            "failed": 0,
        }));
    }

    let listed: Value = server.get("/api/events").await.json();
    let after = ids(&listed);
    assert_eq!(
        vec![before[2].clone(), before[1].clone(), before[0].clone()],
        after
    );
}

#[rstest]
#[tokio::test]
async fn reorder_applies_valid_entries_next_to_malformed_ids(#[future(awt)] context: Context) {
    let server = &context.server;
    for title in ["Aagman", "Visarjan"] {
        server
            .post("/api/media")
            .json(&json!({
                "mediaType": "photo",
                "title": title,
                "url": "https://img.example/photo.jpg",
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let before = ids(&server.get("/api/media?type=photo").await.json::<Value>());

    let response = server
        .put("/api/media/order")
        .json(&json!([
            { "_id": before[0], "order": 5 },
            { "_id": "abc", "order": 0 },
        ]))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "message": "Media order updated successfully",
        "requested": 2,
        "updated": 1,
        "missing": 1,
        "failed": 0,
    }));
    let listed: Value = server.get("/api/media?type=photo").await.json();
    assert_eq!(vec![before[1].clone(), before[0].clone()], ids(&listed));
    assert_eq!(vec![1, 5], orders(&listed));
}

#[rstest]
#[tokio::test]
async fn writes_without_a_token_change_nothing(#[future(awt)] context: Context) {
    let server = &context.server;

    let response = server.post("/api/events").json(&event(1)).await;
    response.assert_status_unauthorized();
    response.assert_json(&json!({ "message": "Not authorized, no token" }));

    let response = server
        .post("/api/sponsors")
        .authorization_bearer("not-a-token")
        .json(&sponsor("A"))
        .await;
    response.assert_status_unauthorized();
    response.assert_json(&json!({ "message": "Not authorized, token failed" }));

    let response = server.put("/api/events/order").json(&json!([])).await;
    response.assert_status_unauthorized();

    let events: Value = server.get("/api/events").await.json();
    let sponsors: Value = server.get("/api/sponsors").await.json();
    assert_eq!(json!([]), events);
    assert_eq!(json!([]), sponsors);
}

#[rstest]
#[tokio::test]
async fn token_of_a_removed_admin_is_rejected(#[future(awt)] context: Context) {
    context
        .engine
        .users()
        .remove(context.admin_id)
        .await
        .unwrap();

    let response = context
        .server
        .post("/api/events")
        .authorization_bearer(&context.token)
        .json(&event(1))
        .await;

    response.assert_status_unauthorized();
    response.assert_json(&json!({ "message": "Not authorized, token failed" }));
}

#[rstest]
#[tokio::test]
async fn media_routes_do_not_need_a_token(#[future(awt)] context: Context) {
    let server = &context.server;

    let created = server
        .post("/api/media")
        .json(&json!({
            "mediaType": "video",
            "title": "Visarjan",
            "url": "https://img.example/thumb.jpg",
            "videoUrl": "https://video.example/visarjan",
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();

    let updated: Value = server
        .put(&format!("/api/media/{}", created["_id"].as_str().unwrap()))
        .json(&json!({ "title": "Visarjan 2025", "url": "https://img.example/thumb.jpg" }))
        .await
        .json();
    assert_eq!("video", updated["mediaType"]);
    assert!(updated.get("videoUrl").is_none(), "omitted videoUrl is removed");

    let videos: Value = server.get("/api/media?type=video").await.json();
    let photos: Value = server.get("/api/media?type=photo").await.json();
    let all: Value = server.get("/api/media").await.json();
    assert_eq!(1, videos.as_array().unwrap().len());
    assert_eq!(json!([]), photos);
    assert_eq!(1, all.as_array().unwrap().len());

    let response = server
        .delete(&format!("/api/media/{}", created["_id"].as_str().unwrap()))
        .await;
    response.assert_json(&json!({ "message": "Media item deleted successfully" }));
}

#[rstest]
#[tokio::test]
async fn messages_are_public_to_send_but_private_to_read(#[future(awt)] context: Context) {
    let server = &context.server;

    let sent = server
        .post("/api/messages")
        .json(&json!({ "name": "Asha", "email": "asha@example.org", "message": "Namaskar" }))
        .await;
    sent.assert_status(StatusCode::CREATED);
    sent.assert_json(&json!({ "message": "Message sent successfully!" }));

    let malformed = server
        .post("/api/messages")
        .json(&json!({ "name": "Asha", "email": "asha-at-example", "message": "Namaskar" }))
        .await;
    malformed.assert_status_bad_request();
    malformed.assert_json(&json!({ "message": "Please provide a valid email address" }));

    server.get("/api/messages").await.assert_status_unauthorized();

    let inbox: Value = server
        .get("/api/messages")
        .authorization_bearer(&context.token)
        .await
        .json();
    assert_eq!(1, inbox.as_array().unwrap().len());
    assert_eq!(false, inbox[0]["isRead"]);

    let read: Value = server
        .put(&format!("/api/messages/{}", inbox[0]["_id"].as_str().unwrap()))
        .authorization_bearer(&context.token)
        .json(&json!({ "isRead": true }))
        .await
        .json();
    assert_eq!(true, read["isRead"]);
}

#[rstest]
#[tokio::test]
async fn highlight_photos_round_trip(#[future(awt)] context: Context) {
    let server = &context.server;

    server
        .post("/api/highlights")
        .authorization_bearer(&context.token)
        .json(&json!({ "year": "2024" }))
        .await
        .assert_status(StatusCode::CREATED);
    let duplicate = server
        .post("/api/highlights")
        .authorization_bearer(&context.token)
        .json(&json!({ "year": "2024" }))
        .await;
    duplicate.assert_status_bad_request();
    duplicate.assert_json(&json!({ "message": "Year already exists" }));

    let added = server
        .post("/api/highlights/2024/photos")
        .authorization_bearer(&context.token)
        .json(&json!({ "title": "Aagman", "src": "https://img.example/aagman.jpg" }))
        .await;
    added.assert_status(StatusCode::CREATED);
    let added: Value = added.json();
    let photo_id = added["photos"][0]["_id"].as_str().unwrap().to_string();

    let removed = server
        .delete(&format!("/api/highlights/2024/photos/{photo_id}"))
        .authorization_bearer(&context.token)
        .await;
    removed.assert_status_ok();
    assert_eq!(json!([]), removed.json::<Value>()["photos"]);

    let missing_year = server
        .post("/api/highlights/1999/photos")
        .authorization_bearer(&context.token)
        .json(&json!({ "title": "Old", "src": "https://img.example/old.jpg" }))
        .await;
    missing_year.assert_status_not_found();
    missing_year.assert_json(&json!({ "message": "Year not found" }));
}

#[rstest]
#[tokio::test]
async fn highlight_years_are_listed_newest_first(#[future(awt)] context: Context) {
    let server = &context.server;
    for year in ["2023", "2025", "2024"] {
        server
            .post("/api/highlights")
            .authorization_bearer(&context.token)
            .json(&json!({ "year": year }))
            .await;
    }

    server
        .get("/api/highlights/years/all")
        .await
        .assert_json(&json!(["2025", "2024", "2023"]));
    server
        .get("/api/highlights/1999")
        .await
        .assert_json(&json!({ "year": "1999", "photos": [], "videos": [] }));

    let deleted = server
        .delete("/api/highlights/1999")
        .authorization_bearer(&context.token)
        .await;
    deleted.assert_status_not_found();
}

#[rstest]
#[tokio::test]
async fn content_default_is_stored_on_first_read(#[future(awt)] context: Context) {
    let server = &context.server;

    let first: Value = server.get("/api/content/hero").await.json();
    let second: Value = server.get("/api/content/hero").await.json();
    assert_eq!(first["_id"], second["_id"], "the default was persisted");
    assert_eq!("Default Welcome (EN)", first["content"]["heading"]["english"]);

    let unknown: Value = server.get("/api/content/contactInfo").await.json();
    assert_eq!(json!({}), unknown["content"]);

    let updated: Value = server
        .put("/api/content/hero")
        .authorization_bearer(&context.token)
        .json(&json!({ "heading": { "english": "Welcome", "marathi": "स्वागत" } }))
        .await
        .json();
    assert_eq!(first["_id"], updated["_id"]);
    assert_eq!("Welcome", updated["content"]["heading"]["english"]);
}

#[rstest]
#[tokio::test]
async fn content_edits_do_not_need_a_token(#[future(awt)] context: Context) {
    let server = &context.server;

    let response = server
        .put("/api/content/about")
        .json(&json!({ "title": { "english": "About us", "marathi": "आमच्याबद्दल" } }))
        .await;

    response.assert_status_ok();
    let stored: Value = server.get("/api/content/about").await.json();
    assert_eq!("About us", stored["content"]["title"]["english"]);
}

#[rstest]
#[tokio::test]
async fn donation_patch_only_touches_sent_fields(#[future(awt)] context: Context) {
    let server = &context.server;
    let default: Value = server.get("/api/donations").await.json();
    assert_eq!("Donation for Vergani", default["title"]);

    let with_upi: Value = server
        .put("/api/donations")
        .authorization_bearer(&context.token)
        .json(&json!({ "upiId": "mandal@upi", "qrCodeUrl": "https://img.example/qr.png" }))
        .await
        .json();
    assert_eq!(default["_id"], with_upi["_id"]);
    assert_eq!("mandal@upi", with_upi["upiId"]);

    let cleared: Value = server
        .put("/api/donations")
        .authorization_bearer(&context.token)
        .json(&json!({ "upiId": null, "title": "Ganeshotsav fund" }))
        .await
        .json();
    assert!(cleared.get("upiId").is_none(), "null clears the field");
    assert_eq!("https://img.example/qr.png", cleared["qrCodeUrl"], "absent keeps the field");
    assert_eq!("Ganeshotsav fund", cleared["title"]);
    assert_eq!(default["description"], cleared["description"]);
}

#[rstest]
#[tokio::test]
async fn upcoming_events_crud(#[future(awt)] context: Context) {
    let server = &context.server;
    let draft = json!({
        "title": { "english": "Navratri", "marathi": "नवरात्री" },
        "dateTime": { "english": "3 Oct, 7 PM", "marathi": "३ ऑक्टो, संध्याकाळी ७" },
        "icon": "ri-calendar-event-line",
        "iconBgColor": "bg-orange-500",
    });

    let created: Value = server
        .post("/api/upcoming-events")
        .authorization_bearer(&context.token)
        .json(&draft)
        .await
        .json();
    let path = format!("/api/upcoming-events/{}", created["_id"].as_str().unwrap());

    let mut changed = draft.clone();
    changed["iconBgColor"] = json!("bg-red-500");
    let updated: Value = server
        .put(&path)
        .authorization_bearer(&context.token)
        .json(&changed)
        .await
        .json();
    assert_eq!("bg-red-500", updated["iconBgColor"]);

    server
        .delete(&path)
        .authorization_bearer(&context.token)
        .await
        .assert_json(&json!({ "message": "Event deleted successfully" }));
    server
        .delete(&path)
        .authorization_bearer(&context.token)
        .await
        .assert_status_not_found();
    server.get("/api/upcoming-events").await.assert_json(&json!([]));
}

#[rstest]
#[tokio::test]
async fn upload_needs_an_image_field(#[future(awt)] context: Context) {
    let server = &context.server;

    let empty = server
        .post("/api/upload")
        .authorization_bearer(&context.token)
        .multipart(MultipartForm::new().add_text("caption", "no file"))
        .await;
    empty.assert_status_bad_request();
    empty.assert_json(&json!({ "message": "No image file provided." }));

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
            .file_name("logo.png")
            .mime_type("image/png"),
    );
    let uploaded = server
        .post("/api/upload")
        .authorization_bearer(&context.token)
        .multipart(form)
        .await;

    uploaded.assert_status_ok();
    uploaded.assert_json(&json!({
        "message": "Image uploaded successfully!",
        "imageUrl": "memory://images/1",
    }));
    let stored = context.engine.images().uploads().await;
    assert_eq!("image/png", stored[0].content_type);
}

fn photo_form(size: usize) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0xff; size])
            .file_name("aarti.jpg")
            .mime_type("image/jpeg"),
    )
}

#[rstest]
#[tokio::test]
async fn upload_accepts_photos_past_two_megabytes(#[future(awt)] context: Context) {
    let response = context
        .server
        .post("/api/upload")
        .authorization_bearer(&context.token)
        .multipart(photo_form(3 * 1024 * 1024))
        .await;

    response.assert_status_ok();
    let stored = context.engine.images().uploads().await;
    assert_eq!(3 * 1024 * 1024, stored[0].bytes.len());
}

#[tokio::test]
async fn upload_over_the_limit_is_too_large() {
    let context = start(|state| state.with_upload_limit(64 * 1024)).await;

    let response = context
        .server
        .post("/api/upload")
        .authorization_bearer(&context.token)
        .multipart(photo_form(128 * 1024))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    response.assert_json(&json!({ "message": "Image is larger than the upload limit." }));
    assert!(context.engine.images().uploads().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn accounts(#[future(awt)] context: Context) {
    let server = &context.server;

    let closed = server
        .post("/api/auth/register")
        .json(&json!({ "username": "second", "password": "pass" }))
        .await;
    closed.assert_status(StatusCode::FORBIDDEN);

    let wrong = server
        .post("/api/auth/login")
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .await;
    wrong.assert_status_unauthorized();
    wrong.assert_json(&json!({ "message": "Invalid username or password" }));

    let session: Value = server
        .post("/api/auth/login")
        .json(&json!({ "username": "admin", "password": "s3cret" }))
        .await
        .json();
    let me = server
        .get("/api/auth/me")
        .authorization_bearer(session["token"].as_str().unwrap())
        .await;
    me.assert_status_ok();
    me.assert_json(&json!({ "_id": context.admin_id.to_string(), "username": "admin" }));
}

#[rstest]
#[tokio::test]
async fn malformed_body_is_a_bad_request(#[future(awt)] context: Context) {
    let response = context
        .server
        .post("/api/events")
        .authorization_bearer(&context.token)
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
}

#[rstest]
#[tokio::test]
async fn metrics_are_unavailable_without_a_recorder(#[future(awt)] context: Context) {
    context
        .server
        .get("/metrics")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
