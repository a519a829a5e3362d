//! Step definitions for the volunteer journey scenarios.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::time::Duration;

use actix_web::http::{Method, header};
use awc::ws::Frame;
use futures_util::StreamExt;
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use crate::harness::{
    BrowserRequest, HeaderSocket, LOCAL_ORIGIN, SharedWorld, WorldFixture, block_on, send,
};

const PASSWORD: &str = "correct-horse";

fn email_for(name: &str) -> String {
    format!("{name}@example.org")
}

fn display_name_for(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn request(world: &SharedWorld, browser: &str, method: Method, path: String, payload: Option<Value>) {
    send(
        world,
        BrowserRequest {
            browser,
            method,
            path,
            payload,
        },
    );
}

fn last_status(world: &SharedWorld) -> u16 {
    world.borrow().last.status
}

fn last_body(world: &SharedWorld) -> Value {
    world.borrow().last.body.clone()
}

fn opportunity_id(world: &SharedWorld) -> String {
    world
        .borrow()
        .opportunity_id
        .clone()
        .expect("an opportunity was created")
}

fn sign_up(world: &SharedWorld, name: &str) {
    request(
        world,
        name,
        Method::POST,
        "/api/v1/auth/sign-up".to_owned(),
        Some(json!({
            "email": email_for(name),
            "password": PASSWORD,
            "fullName": display_name_for(name),
        })),
    );
    assert_eq!(last_status(world), 201, "sign up: {}", last_body(world));
}

fn sign_in(world: &SharedWorld, name: &str) {
    request(
        world,
        name,
        Method::POST,
        "/api/v1/auth/sign-in".to_owned(),
        Some(json!({ "email": email_for(name), "password": PASSWORD })),
    );
}

fn ids_in(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("opportunity list")
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

fn public_ids(world: &SharedWorld) -> Vec<String> {
    request(world, "guest", Method::GET, "/api/v1/opportunities".to_owned(), None);
    assert_eq!(last_status(world), 200);
    ids_in(&last_body(world))
}

fn dashboard_ids(world: &SharedWorld, name: &str) -> Vec<String> {
    request(world, name, Method::GET, "/api/v1/dashboard".to_owned(), None);
    assert_eq!(last_status(world), 200, "dashboard: {}", last_body(world));
    ids_in(&last_body(world)["opportunities"])
}

/// Next header pushed over the socket, skipping heartbeats.
async fn next_header(mut socket: HeaderSocket) -> (HeaderSocket, Value) {
    let header = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match socket.next().await.expect("socket frame").expect("frame") {
                Frame::Text(bytes) => {
                    return serde_json::from_slice::<Value>(&bytes).expect("json frame");
                }
                Frame::Ping(_) | Frame::Pong(_) => continue,
                other => panic!("unexpected frame: {other:?}"),
            }
        }
    })
    .await
    .expect("header within timeout");
    (socket, header)
}

fn read_header(world: &SharedWorld) {
    let socket = world
        .borrow_mut()
        .header_socket
        .take()
        .expect("header socket open");
    let (socket, header) = block_on(world, |_| next_header(socket));
    let mut ctx = world.borrow_mut();
    ctx.header_socket = Some(socket);
    ctx.last_header = Some(header);
}

#[given("a running community server")]
fn a_running_community_server(world: &WorldFixture) {
    let _ = world;
}

#[given("{name} has a confirmed account")]
fn has_a_confirmed_account(world: &WorldFixture, name: String) {
    let world = world.world();
    sign_up(&world, &name);
    let token = world
        .borrow()
        .mailer
        .token_for(&email_for(&name))
        .expect("verification token sent");
    request(
        &world,
        &name,
        Method::GET,
        format!("/api/v1/auth/verify?token={token}"),
        None,
    );
    assert_eq!(last_status(&world), 200, "verify: {}", last_body(&world));
    sign_in(&world, &name);
    assert_eq!(last_status(&world), 200, "sign in: {}", last_body(&world));
}

#[when("{name} creates the Park Cleanup opportunity")]
fn creates_the_park_cleanup_opportunity(world: &WorldFixture, name: String) {
    let world = world.world();
    request(
        &world,
        &name,
        Method::POST,
        "/api/v1/opportunities".to_owned(),
        Some(json!({
            "title": "Park Cleanup",
            "description": "Help tidy the riverside park",
            "category": "Environment",
            "location": "Riverside Park",
            "duration": "3 hours",
            "peopleNeeded": 5,
            "emoji": "🌳",
        })),
    );
    assert_eq!(last_status(&world), 201, "create: {}", last_body(&world));
    let body = last_body(&world);
    assert_eq!(body["notice"], "Opportunity created!");
    let id = body["opportunity"]["id"]
        .as_str()
        .expect("created opportunity id")
        .to_owned();
    world.borrow_mut().opportunity_id = Some(id);
}

#[then("the opportunity is on the dashboard of {name}")]
fn the_opportunity_is_on_the_dashboard(world: &WorldFixture, name: String) {
    let world = world.world();
    let id = opportunity_id(&world);
    assert_eq!(dashboard_ids(&world, &name), vec![id]);
}

#[then("the opportunity is publicly listed")]
fn the_opportunity_is_publicly_listed(world: &WorldFixture) {
    let world = world.world();
    let id = opportunity_id(&world);
    assert!(public_ids(&world).contains(&id));
}

#[when("{name} applies to the opportunity")]
fn applies_to_the_opportunity(world: &WorldFixture, name: String) {
    let world = world.world();
    let id = opportunity_id(&world);
    request(
        &world,
        &name,
        Method::POST,
        format!("/api/v1/opportunities/{id}/applications"),
        None,
    );
}

#[then("the application is pending")]
fn the_application_is_pending(world: &WorldFixture) {
    let world = world.world();
    let body = last_body(&world);
    assert_eq!(last_status(&world), 201, "apply: {body}");
    assert_eq!(body["notice"], "Application submitted successfully!");
    assert_eq!(body["application"]["status"], "pending");
    assert_eq!(
        body["application"]["opportunityId"].as_str(),
        Some(opportunity_id(&world).as_str())
    );
}

#[then("the application is rejected as a duplicate")]
fn the_application_is_rejected_as_a_duplicate(world: &WorldFixture) {
    let world = world.world();
    let body = last_body(&world);
    assert_eq!(last_status(&world), 409, "apply again: {body}");
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "You've already applied to this opportunity");
}

#[when("{name} deletes the opportunity without confirming")]
fn deletes_without_confirming(world: &WorldFixture, name: String) {
    let world = world.world();
    let id = opportunity_id(&world);
    request(
        &world,
        &name,
        Method::DELETE,
        format!("/api/v1/opportunities/{id}"),
        None,
    );
}

#[then("the deletion asks for confirmation")]
fn the_deletion_asks_for_confirmation(world: &WorldFixture) {
    let world = world.world();
    assert_eq!(last_status(&world), 400);
    assert_eq!(
        last_body(&world)["message"],
        "Are you sure you want to delete this opportunity?"
    );
    let id = opportunity_id(&world);
    assert!(public_ids(&world).contains(&id));
}

#[when("{name} deletes the opportunity after confirming")]
fn deletes_after_confirming(world: &WorldFixture, name: String) {
    let world = world.world();
    let id = opportunity_id(&world);
    request(
        &world,
        &name,
        Method::DELETE,
        format!("/api/v1/opportunities/{id}?confirm=true"),
        None,
    );
    assert_eq!(last_status(&world), 200, "delete: {}", last_body(&world));
    assert_eq!(last_body(&world)["notice"], "Opportunity deleted");
}

#[then("the opportunity is no longer publicly listed")]
fn the_opportunity_is_no_longer_publicly_listed(world: &WorldFixture) {
    let world = world.world();
    let id = opportunity_id(&world);
    assert!(!public_ids(&world).contains(&id));
}

#[then("the dashboard of {name} has no opportunities")]
fn the_dashboard_has_no_opportunities(world: &WorldFixture, name: String) {
    let world = world.world();
    assert!(dashboard_ids(&world, &name).is_empty());
}

#[when("browser {name} opens {path}")]
fn browser_opens(world: &WorldFixture, name: String, path: String) {
    request(&world.world(), &name, Method::GET, path, None);
}

#[then("the browser is redirected to {path}")]
fn the_browser_is_redirected(world: &WorldFixture, path: String) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last.status, 303);
    assert_eq!(ctx.last.location.as_deref(), Some(path.as_str()));
}

#[then("the page shows {name} in the header")]
fn the_page_shows_the_user(world: &WorldFixture, name: String) {
    let world = world.world();
    let body = last_body(&world);
    assert_eq!(last_status(&world), 200, "page: {body}");
    assert_eq!(
        body["header"]["user"]["displayName"].as_str(),
        Some(display_name_for(&name).as_str())
    );
}

#[when("{name} signs up without confirming the email")]
fn signs_up_without_confirming(world: &WorldFixture, name: String) {
    sign_up(&world.world(), &name);
}

#[then("signing in as {name} fails with {message}")]
fn signing_in_fails(world: &WorldFixture, name: String, message: String) {
    let world = world.world();
    sign_in(&world, &name);
    let body = last_body(&world);
    assert_eq!(last_status(&world), 401, "sign in: {body}");
    assert_eq!(body["message"].as_str(), Some(message.as_str()));
}

#[when("{name} opens the header socket")]
fn opens_the_header_socket(world: &WorldFixture, name: String) {
    let world = world.world();
    let cookie = world
        .borrow()
        .cookies
        .get(&name)
        .cloned()
        .expect("browser cookie");
    let socket = block_on(&world, |base_url| async move {
        awc::Client::default()
            .ws(format!("{base_url}/ws/session"))
            .set_header(header::ORIGIN, LOCAL_ORIGIN)
            .set_header(header::COOKIE, cookie)
            .connect()
            .await
            .map(|(_response, socket)| socket)
            .expect("websocket connect")
    });
    world.borrow_mut().header_socket = Some(socket);
    read_header(&world);
}

#[then("the header shows {name}")]
fn the_header_shows(world: &WorldFixture, name: String) {
    let world = world.world();
    let ctx = world.borrow();
    let header = ctx.last_header.as_ref().expect("header pushed");
    assert_eq!(header["type"], "header");
    assert_eq!(
        header["header"]["user"]["displayName"].as_str(),
        Some(display_name_for(&name).as_str())
    );
}

#[when("{name} signs out")]
fn signs_out(world: &WorldFixture, name: String) {
    let world = world.world();
    request(
        &world,
        &name,
        Method::POST,
        "/api/v1/auth/sign-out".to_owned(),
        None,
    );
    assert_eq!(last_status(&world), 200);
    read_header(&world);
}

#[then("the header is anonymous")]
fn the_header_is_anonymous(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    let header = ctx.last_header.as_ref().expect("header pushed");
    assert_eq!(header["header"]["user"], Value::Null);
    assert_eq!(header["header"]["links"][0]["href"], "/auth");
}
