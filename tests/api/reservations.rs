use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use futures_util::future::join_all;
use restaurant::schema::reservation_tables;
use serde_json::Value;

use crate::helpers::{reservation_body, table_ids, TestApp};

#[actix_web::test]
async fn party_of_five_gets_the_six_seater(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;

    let response = app.post("/api/reservations", &token, &reservation_body(5, "19:00")).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    let reservation = &body["reservation"];

    assert!(body["message"].as_str().is_some());
    assert_eq!(table_ids(reservation), vec![5]);
    assert_eq!(reservation["status"], "pending");
    assert_eq!(reservation["time"], "19:00");
    assert_eq!(reservation["number_of_people"], 5);
}

#[actix_web::test]
async fn tables_taken_at_a_slot_are_skipped(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;

    let first = app.book(&token, 8, "19:00").await;
    assert_eq!(table_ids(&first), vec![5, 3]);

    let second = app.book(&token, 6, "19:00").await;
    assert_eq!(table_ids(&second), vec![4, 1]);

    // Another slot starts from a full dining room
    let other_slot = app.book(&token, 6, "21:30").await;
    assert_eq!(table_ids(&other_slot), vec![5]);
}

#[actix_web::test]
async fn party_larger_than_free_capacity_is_rejected(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;
    app.book(&token, 8, "19:00").await;

    let response = app.post("/api/reservations", &token, &reservation_body(12, "19:00")).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("12"));

    let mine: Value = app.get("/api/my-reservations", Some(&token)).await.json().await.unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn invalid_requests_are_rejected_before_booking(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;

    let mut past_date = reservation_body(2, "19:00");
    past_date["date"] = "2020-01-01".into();

    let mut bad_time = reservation_body(2, "19:00");
    bad_time["time"] = "7pm".into();

    let mut missing_phone = reservation_body(2, "19:00");
    missing_phone.as_object_mut().unwrap().remove("phone");

    let cases = [
        (past_date, "past date"),
        (bad_time, "malformed time"),
        (missing_phone, "missing phone"),
        (reservation_body(0, "19:00"), "empty party"),
        (reservation_body(13, "19:00"), "party above the online limit"),
    ];

    for (body, description) in cases {
        let response = app.post("/api/reservations", &token, &body).await;
        assert_eq!(response.status().as_u16(), 400, "Booking did not fail with {}", description);
    }

    let mine: Value = app.get("/api/my-reservations", Some(&token)).await.json().await.unwrap();
    assert!(mine.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn booking_requires_authentication(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;

    let response = app.api_client
        .post(format!("{}/api/reservations", app.get_app_url()))
        .json(&reservation_body(2, "19:00"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn failed_edit_keeps_original_tables(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;

    let reservation = app.book(&token, 5, "19:00").await;
    app.book(&token, 12, "20:00").await;

    let response = app.put(
        &format!("/api/reservations/{}", reservation["id"]),
        &token,
        &serde_json::json!({ "time": "20:00" })
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let mine: Value = app.get("/api/my-reservations", Some(&token)).await.json().await.unwrap();
    let unchanged = mine.as_array().unwrap()
        .iter()
        .find(|r| r["id"] == reservation["id"])
        .unwrap();

    assert_eq!(unchanged["time"], "19:00");
    assert_eq!(table_ids(unchanged), vec![5]);
}

#[actix_web::test]
async fn edit_without_slot_change_keeps_tables(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;
    let reservation = app.book(&token, 4, "19:00").await;

    let response = app.put(
        &format!("/api/reservations/{}", reservation["id"]),
        &token,
        &serde_json::json!({ "name": "Marie Curie", "note": "Terrasse" })
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["reservation"]["name"], "Marie Curie");
    assert_eq!(body["reservation"]["note"], "Terrasse");
    assert_eq!(table_ids(&body["reservation"]), vec![3]);
}

#[actix_web::test]
async fn edit_can_reuse_own_tables(){
    let app = TestApp::spawn_app().await;
    app.add_tables(&[6]).await;
    let token = app.client_token("jean@example.com").await;
    let reservation = app.book(&token, 5, "19:00").await;

    let response = app.put(
        &format!("/api/reservations/{}", reservation["id"]),
        &token,
        &serde_json::json!({ "number_of_people": 6 })
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["reservation"]["number_of_people"], 6);
    assert_eq!(table_ids(&body["reservation"]), vec![1]);
}

#[actix_web::test]
async fn cancelling_releases_tables_and_cannot_repeat(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;
    let reservation = app.book(&token, 5, "19:00").await;
    let path = format!("/api/reservations/{}", reservation["id"]);

    assert_eq!(app.delete(&path, &token).await.status().as_u16(), 200);
    assert_eq!(app.delete(&path, &token).await.status().as_u16(), 400);

    let rebooked = app.book(&token, 5, "19:00").await;
    assert_eq!(table_ids(&rebooked), vec![5]);

    // The released assignment stays as an audit row
    let mut conn = app.pool.get().unwrap();
    let released = reservation_tables::table
        .filter(reservation_tables::released_at.is_not_null())
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();
    assert_eq!(released, 1);

    let mine: Value = app.get("/api/my-reservations", Some(&token)).await.json().await.unwrap();
    let cancelled = mine.as_array().unwrap()
        .iter()
        .find(|r| r["id"] == reservation["id"])
        .unwrap();
    assert_eq!(cancelled["status"], "cancelled");
    assert!(table_ids(cancelled).is_empty());
}

#[actix_web::test]
async fn only_admins_confirm_and_confirmation_happens_once(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let client = app.client_token("jean@example.com").await;
    let admin = app.admin_token().await;
    let reservation = app.book(&client, 2, "12:30").await;
    let validate = format!("/api/reservations/{}/validate", reservation["id"]);

    assert_eq!(app.patch(&validate, &client).await.status().as_u16(), 403);
    assert_eq!(app.patch(&validate, &admin).await.status().as_u16(), 200);
    assert_eq!(app.patch(&validate, &admin).await.status().as_u16(), 400);

    // Confirmed reservations are frozen but can still be cancelled
    let path = format!("/api/reservations/{}", reservation["id"]);
    let edit = app.put(&path, &client, &serde_json::json!({ "time": "13:00" })).await;
    assert_eq!(edit.status().as_u16(), 400);

    assert_eq!(app.delete(&path, &client).await.status().as_u16(), 200);
    assert_eq!(app.patch(&validate, &admin).await.status().as_u16(), 400);
}

#[actix_web::test]
async fn clients_cannot_see_or_touch_other_reservations(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let owner = app.client_token("jean@example.com").await;
    let stranger = app.client_token("marie@example.com").await;
    let reservation = app.book(&owner, 2, "19:00").await;
    let path = format!("/api/reservations/{}", reservation["id"]);

    let edit = app.put(&path, &stranger, &serde_json::json!({ "name": "Hijack" })).await;
    assert_eq!(edit.status().as_u16(), 404);
    assert_eq!(app.delete(&path, &stranger).await.status().as_u16(), 404);
    assert_eq!(app.get("/api/reservations", Some(&stranger)).await.status().as_u16(), 403);

    let theirs: Value = app.get("/api/my-reservations", Some(&stranger)).await.json().await.unwrap();
    assert!(theirs.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn admin_listing_includes_owner(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let client = app.client_token("jean@example.com").await;
    let admin = app.admin_token().await;
    app.book(&client, 2, "19:00").await;

    let response = app.get("/api/reservations", Some(&admin)).await;
    assert_eq!(response.status().as_u16(), 200);

    let all: Value = response.json().await.unwrap();
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["email"], "jean@example.com");
    assert_eq!(all[0]["user_fname"], "Jean");
    assert_eq!(all[0]["user_lname"], "Dupont");
    assert_eq!(table_ids(&all[0]), vec![1]);
}

#[actix_web::test]
async fn admin_can_edit_any_pending_reservation(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let client = app.client_token("jean@example.com").await;
    let admin = app.admin_token().await;
    let reservation = app.book(&client, 2, "19:00").await;

    let response = app.put(
        &format!("/api/reservations/{}", reservation["id"]),
        &admin,
        &serde_json::json!({ "number_of_people": 4 })
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(table_ids(&body["reservation"]), vec![3]);
}

#[actix_web::test]
async fn concurrent_bookings_never_share_a_table(){
    let app = TestApp::spawn_app().await;
    app.add_tables(&[6]).await;
    let token = app.client_token("jean@example.com").await;
    let body = reservation_body(6, "19:00");

    let responses = join_all(
        (0..4).map(|_| app.post("/api/reservations", &token, &body))
    )
    .await;

    let created = responses.iter()
        .filter(|r| r.status().as_u16() == 201)
        .count();
    assert_eq!(created, 1);

    let mut conn = app.pool.get().unwrap();
    let active = reservation_tables::table
        .filter(reservation_tables::released_at.is_null())
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();
    assert_eq!(active, 1);
}

#[actix_web::test]
async fn oversubscribed_slot_answers_created_or_infeasible(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;
    let body = reservation_body(2, "19:00");

    let responses = join_all(
        (0..8).map(|_| app.post("/api/reservations", &token, &body))
    )
    .await;

    let statuses: Vec<u16> = responses.iter()
        .map(|r| r.status().as_u16())
        .collect();

    assert!(statuses.iter().all(|s| *s == 201 || *s == 400), "Unexpected statuses {:?}", statuses);
    // One party of two per table, five tables in the dining room
    assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 5);
}

#[actix_web::test]
async fn note_can_be_cleared(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;

    for cleared in [Value::Null, Value::from("")] {
        let reservation = app.book(&token, 2, "19:00").await;
        assert_eq!(reservation["note"], "Anniversaire");

        let response = app.put(
            &format!("/api/reservations/{}", reservation["id"]),
            &token,
            &serde_json::json!({ "note": cleared })
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert!(body["reservation"]["note"].is_null());
    }

    // Leaving the field out keeps the note
    let reservation = app.book(&token, 2, "20:00").await;
    let response = app.put(
        &format!("/api/reservations/{}", reservation["id"]),
        &token,
        &serde_json::json!({ "name": "Marie Curie" })
    )
    .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["reservation"]["note"], "Anniversaire");
}

#[actix_web::test]
async fn single_digit_hour_is_accepted(){
    let app = TestApp::spawn_app().await;
    app.add_demo_tables().await;
    let token = app.client_token("jean@example.com").await;

    let response = app.post("/api/reservations", &token, &reservation_body(2, "9:30")).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["reservation"]["time"], "09:30");
}
