//! Behaviour tests for the booking workflow and catalogue curation.
//!
//! Steps are synchronous; each one drives the application on an actix
//! system runner owned by the world.
#![allow(non_snake_case)]

#[path = "support/http.rs"]
mod http_support;

use std::cell::RefCell;

use actix_rt::SystemRunner;
use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;
use chrono::{NaiveDate, TimeZone, Utc};
use http_support::{PASSWORD, Reply, authed, booking_body, login, register, send, tour_body};
use mockable::Clock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use tour_booking::domain::ports::TourRepository;
use tour_booking::domain::{Tour, TourId};
use tour_booking::server::{AppDependencies, bootstrap_admin};
use tour_booking::test_support::{MemoryBackend, PlainTextHasher, sample_draft};

const TRAVELLER_EMAIL: &str = "alice@example.com";
const ADMIN_EMAIL: &str = "admin@example.com";

struct BookingWorld {
    runner: SystemRunner,
    backend: MemoryBackend,
    deps: AppDependencies,
    tours: RefCell<Vec<(String, String)>>,
    traveller: RefCell<Option<Cookie<'static>>>,
    admin: RefCell<Option<Cookie<'static>>>,
    booking_id: RefCell<Option<String>>,
    last: RefCell<Option<Reply>>,
}

impl BookingWorld {
    fn new() -> Self {
        let backend = MemoryBackend::new(Utc::now());
        let deps = backend.app_dependencies();
        Self {
            runner: actix_rt::System::new(),
            backend,
            deps,
            tours: RefCell::new(Vec::new()),
            traveller: RefCell::new(None),
            admin: RefCell::new(None),
            booking_id: RefCell::new(None),
            last: RefCell::new(None),
        }
    }

    fn tour_id(&self, name: &str) -> String {
        self.tours
            .borrow()
            .iter()
            .find(|(tour, _)| tour == name)
            .map(|(_, id)| id.clone())
            .expect("tour should be known to the scenario")
    }

    fn traveller_request(&self, request: TestRequest) -> Reply {
        let cookie = self.traveller.borrow().clone();
        self.runner
            .block_on(send(&self.deps, authed(request, cookie.as_ref())))
    }

    fn record(&self, reply: Reply) {
        *self.last.borrow_mut() = Some(reply);
    }

    fn with_body<F>(&self, f: F)
    where
        F: FnOnce(&Value),
    {
        let last = self.last.borrow();
        let reply = last.as_ref().expect("a request should have been sent");
        f(&reply.body);
    }
}

#[fixture]
fn world() -> BookingWorld {
    BookingWorld::new()
}

#[given("the clock reads {date}")]
fn the_clock_reads(world: &BookingWorld, date: String) {
    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d").expect("ISO date");
    let instant = Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).expect("valid time"));
    world.backend.clock.set(instant);
}

#[given("a tour named {name} priced at {price} per person")]
fn a_tour_named_priced_at(world: &BookingWorld, name: String, price: i64) {
    let tour = Tour::create(
        TourId::random(),
        sample_draft(&name, price),
        world.backend.clock.utc(),
    )
    .expect("valid draft");
    world
        .runner
        .block_on(world.backend.tours.insert(&tour))
        .expect("insert tour");
    world
        .tours
        .borrow_mut()
        .push((name, tour.id().to_string()));
}

#[given("a registered traveller")]
fn a_registered_traveller(world: &BookingWorld) {
    let reply = world
        .runner
        .block_on(register(&world.deps, "Alice", TRAVELLER_EMAIL));
    assert_eq!(reply.status.as_u16(), 201, "registration should succeed");
    *world.traveller.borrow_mut() = reply.session;
}

#[given("a signed-in administrator")]
fn a_signed_in_administrator(world: &BookingWorld) {
    let backend = &world.backend;
    world
        .runner
        .block_on(bootstrap_admin(
            backend.users.as_ref(),
            &PlainTextHasher,
            backend.clock.as_ref(),
            ADMIN_EMAIL,
            Some(PASSWORD),
        ))
        .expect("bootstrap admin");
    let reply = world
        .runner
        .block_on(login(&world.deps, ADMIN_EMAIL, PASSWORD));
    *world.admin.borrow_mut() = Some(reply.session.expect("admin session cookie"));
}

#[when("the traveller books {participants} participants for {date}")]
fn the_traveller_books(world: &BookingWorld, participants: i64, date: String) {
    let tour_id = world
        .tours
        .borrow()
        .first()
        .map(|(_, id)| id.clone())
        .expect("a tour should exist");
    let reply = world.traveller_request(
        TestRequest::post()
            .uri("/api/bookings")
            .set_json(booking_body(&tour_id, &date, participants)),
    );
    if let Some(id) = reply.body["id"].as_str() {
        *world.booking_id.borrow_mut() = Some(id.to_owned());
    }
    world.record(reply);
}

#[when("the traveller lists their bookings")]
fn the_traveller_lists_their_bookings(world: &BookingWorld) {
    let reply = world.traveller_request(TestRequest::get().uri("/api/bookings"));
    world.record(reply);
}

#[when("the traveller cancels the booking")]
fn the_traveller_cancels_the_booking(world: &BookingWorld) {
    let id = world
        .booking_id
        .borrow()
        .clone()
        .expect("a booking should exist");
    let reply =
        world.traveller_request(TestRequest::patch().uri(&format!("/api/bookings/{id}/cancel")));
    world.record(reply);
}

#[when("the traveller creates a tour named {name}")]
fn the_traveller_creates_a_tour(world: &BookingWorld, name: String) {
    let reply = world.traveller_request(
        TestRequest::post()
            .uri("/api/tours")
            .set_json(tour_body(&name, 250)),
    );
    world.record(reply);
}

#[when("the administrator creates a tour named {name}")]
fn the_administrator_creates_a_tour(world: &BookingWorld, name: String) {
    let cookie = world.admin.borrow().clone();
    let request = authed(TestRequest::post().uri("/api/tours"), cookie.as_ref())
        .set_json(tour_body(&name, 250));
    let reply = world.runner.block_on(send(&world.deps, request));
    world.record(reply);
}

#[when("the catalogue is listed")]
fn the_catalogue_is_listed(world: &BookingWorld) {
    let reply = world
        .runner
        .block_on(send(&world.deps, TestRequest::get().uri("/api/tours")));
    world.record(reply);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &BookingWorld, status: u16) {
    let last = world.last.borrow();
    let reply = last.as_ref().expect("a request should have been sent");
    assert_eq!(reply.status.as_u16(), status, "body: {}", reply.body);
}

#[then("the booking total price is {total}")]
fn the_booking_total_price_is(world: &BookingWorld, total: u64) {
    world.with_body(|body| assert_eq!(body["totalPrice"].as_u64(), Some(total)));
}

#[then("the booking status is {status}")]
fn the_booking_status_is(world: &BookingWorld, status: String) {
    world.with_body(|body| assert_eq!(body["status"].as_str(), Some(status.as_str())));
}

#[then("the error detail code is {code}")]
fn the_error_detail_code_is(world: &BookingWorld, code: String) {
    world.with_body(|body| assert_eq!(body["details"]["code"].as_str(), Some(code.as_str())));
}

#[then("the listing holds {count} booking for {name}")]
fn the_listing_holds(world: &BookingWorld, count: usize, name: String) {
    let tour_id = world.tour_id(&name);
    world.with_body(|body| {
        let items = body.as_array().expect("booking list");
        assert_eq!(items.len(), count);
        assert!(
            items
                .iter()
                .all(|item| item["tour"]["id"].as_str() == Some(tour_id.as_str())
                    && item["tour"]["name"].as_str() == Some(name.as_str()))
        );
    });
}

#[then("the catalogue includes {name}")]
fn the_catalogue_includes(world: &BookingWorld, name: String) {
    world.with_body(|body| {
        let items = body.as_array().expect("tour list");
        assert!(
            items
                .iter()
                .any(|tour| tour["name"].as_str() == Some(name.as_str())),
            "{name} missing from {body}"
        );
    });
}

#[scenario(
    path = "tests/features/booking_workflow.feature",
    name = "A traveller books and cancels a tour"
)]
fn a_traveller_books_and_cancels_a_tour(world: BookingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/booking_workflow.feature",
    name = "Only administrators curate the catalogue"
)]
fn only_administrators_curate_the_catalogue(world: BookingWorld) {
    let _ = world;
}
